use std::sync::LazyLock;

use regex::Regex;

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("valid image pattern"));

/// Same as `IMAGE`, plus the whitespace that follows the image.
static IMAGE_WITH_TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)\s*").expect("valid image pattern"));

/// Source of the first Markdown image (`![alt](src)`) in `content`.
pub fn extract_featured_image(content: &str) -> Option<&str> {
    IMAGE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Remove only the first Markdown image, together with the whitespace after
/// it. Later images stay in the body.
pub fn remove_first_image(content: &str) -> String {
    IMAGE_WITH_TRAILING_SPACE.replace(content, "").into_owned()
}
