//! Pure helpers behind the data-maintenance commands: promoting the first
//! image of a post to its featured image, normalizing legacy dates and slugs,
//! and reading posts written as Markdown files with front matter.

mod dates;
mod featured;
mod frontmatter;

pub use dates::{is_iso_date, parse_spanish_date};
pub use featured::{extract_featured_image, remove_first_image};
pub use frontmatter::{FrontMatter, FrontMatterError, MarkdownDocument};

/// Strip a leading ordering prefix such as `1.` from a legacy slug.
pub fn clean_slug(slug: &str) -> &str {
    let digits = slug.bytes().take_while(u8::is_ascii_digit).count();
    match slug[digits..].strip_prefix('.') {
        Some(rest) if digits > 0 => rest,
        _ => slug,
    }
}
