use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parse a legacy date such as `29 de Marzo` into a date in `year`.
///
/// Returns `None` for anything that is not `<day> de <month>` with a Spanish
/// month name, or for days that do not exist in that month.
pub fn parse_spanish_date(text: &str, year: i32) -> Option<NaiveDate> {
    let mut parts = text.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    if !parts.next()?.eq_ignore_ascii_case("de") {
        return None;
    }
    let month_name = parts.next()?.to_lowercase();
    if parts.next().is_some() {
        return None;
    }
    let month = match month_name.as_str() {
        // Both spellings are in use.
        "setiembre" => 9,
        name => MONTHS.iter().position(|m| *m == name)? as u32 + 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whether `text` is already a valid `YYYY-MM-DD` date.
pub fn is_iso_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spanish_date() {
        assert_eq!(
            parse_spanish_date("29 de Marzo", 2022),
            NaiveDate::from_ymd_opt(2022, 3, 29)
        );
        assert_eq!(
            parse_spanish_date("22 DE septiembre", 2022),
            NaiveDate::from_ymd_opt(2022, 9, 22)
        );
        assert_eq!(
            parse_spanish_date("1 de setiembre", 2023),
            NaiveDate::from_ymd_opt(2023, 9, 1)
        );
    }

    #[test]
    fn test_rejects_unparseable() {
        assert_eq!(parse_spanish_date("2022-03-29", 2022), None);
        assert_eq!(parse_spanish_date("29 de Marzzo", 2022), None);
        assert_eq!(parse_spanish_date("31 de Febrero", 2022), None);
        assert_eq!(parse_spanish_date("29 de Marzo de 2021", 2022), None);
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2022-09-22"));
        assert!(!is_iso_date("22 de Septiembre"));
        assert!(!is_iso_date("2022-02-30"));
    }
}
