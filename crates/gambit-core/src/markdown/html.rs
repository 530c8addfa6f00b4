//! HTML fragments emitted in place of parser output.

const IMAGE_STYLE: &str = "max-width: 100%; height: auto; margin-top: 2rem !important; \
margin-bottom: 1.5rem !important; display: block; border-radius: 12px;";

const POST_LINK_STYLE: &str = "display: block; text-decoration: none;";

const PLACEHOLDER_STYLE: &str = "color: red; font-style: italic;";

/// Escape text for use in element content or a double-quoted attribute.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn invalid_image() -> String {
    format!(r#"<div style="{PLACEHOLDER_STYLE}">[Imagen no válida]</div>"#)
}

pub(crate) fn missing_image(src: &str) -> String {
    format!(
        r#"<div style="{PLACEHOLDER_STYLE}">[Imagen no encontrada: {}]</div>"#,
        escape(src)
    )
}

pub(crate) fn image_tag(src: &str, alt: &str, title: &str) -> String {
    let mut tag = format!(r#"<img src="{}" alt="{}""#, escape(src), escape(alt));
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, escape(title)));
    }
    tag.push_str(&format!(r#" style="{IMAGE_STYLE}" />"#));
    tag
}

pub(crate) fn wrap_in_post_link(post_url: &str, inner: &str) -> String {
    format!(
        r#"<a href="{}" style="{POST_LINK_STYLE}">{inner}</a>"#,
        escape(post_url)
    )
}

/// Opening tag of a link that leaves the site.
pub(crate) fn external_link_open(href: &str, title: &str) -> String {
    let mut tag = format!(r#"<a href="{}""#, escape(href));
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, escape(title)));
    }
    tag.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
    tag
}
