use crate::error::DomainError;

/// Path segments a post slug may not take, since they collide with routes.
pub const RESERVED_SLUGS: &[&str] = &["new", "edit", "admin", "api", "slug"];

/// Check that `slug` is URL-safe and not reserved.
///
/// A slug is URL-safe when it is already in its slugified form: lowercase
/// ASCII alphanumerics separated by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.trim().is_empty() {
        return Err(DomainError::missing_field("slug"));
    }
    if slug::slugify(slug) != slug {
        return Err(DomainError::Validation(format!(
            "Slug inválido: {slug} (solo minúsculas, números y guiones)"
        )));
    }
    if RESERVED_SLUGS.contains(&slug) {
        return Err(DomainError::Validation(format!("Slug reservado: {slug}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_slug() {
        assert!(validate_slug("torneo-22-sept").is_ok());
        assert!(validate_slug("blitz2024").is_ok());
    }

    #[test]
    fn test_rejects_unsafe_slug() {
        for slug in ["Torneo", "con espacio", "doble--guion", "-borde", "ñandú", "1.torneo"] {
            assert!(validate_slug(slug).is_err(), "{slug} should be rejected");
        }
    }

    #[test]
    fn test_rejects_reserved_and_empty() {
        assert!(matches!(validate_slug("admin"), Err(DomainError::Validation(_))));
        assert!(matches!(validate_slug("  "), Err(DomainError::Validation(msg)) if msg == "Campo requerido: slug"));
    }
}
