use std::cell::RefCell;
use std::sync::Arc;

use comrak::arena_tree::Node;
use comrak::nodes::{Ast, AstNode, LineColumn, NodeLink, NodeValue};
use comrak::{Arena, Options};

use super::html;
use crate::ports::ImageUrlResolver;

/// Parser options for a render. Every render builds its own comrak options
/// from this value, so concurrent renders share nothing mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// A single newline inside a paragraph becomes `<br />`.
    pub hard_breaks: bool,
    /// GitHub-flavored extensions: tables, strikethrough, autolinks, task
    /// lists and the tag filter.
    pub gfm: bool,
    /// Pass raw HTML written in the Markdown through. When unset it is
    /// rendered as escaped text.
    pub allow_raw_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            gfm: true,
            allow_raw_html: false,
        }
    }
}

impl RenderConfig {
    fn options(&self) -> Options<'static> {
        let mut options = Options::default();

        options.extension.strikethrough = self.gfm;
        options.extension.table = self.gfm;
        options.extension.autolink = self.gfm;
        options.extension.tasklist = self.gfm;
        options.extension.tagfilter = self.gfm;

        options.render.hardbreaks = self.hard_breaks;
        // Rewritten links and images are spliced in as inline HTML nodes.
        // Author-supplied HTML is neutralized before that when not allowed.
        options.render.unsafe_ = true;

        options
    }
}

/// Errors that escape a render. Image problems never do; they become
/// inline placeholders.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("HTML serialization failed: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("Rendered HTML is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Converts a post's Markdown body into a presentation-ready HTML fragment.
///
/// After parsing, the document tree is rewritten before serialization:
///
/// - links whose target does not start with `/` or `#` open in a new
///   browsing context with `rel="noopener noreferrer"`;
/// - images with an absolute `src` are kept, storage-relative ones are
///   resolved through the [`ImageUrlResolver`], and unusable ones are
///   replaced by a visible placeholder;
/// - when a post URL is given, every image is wrapped in a link to it.
///
/// Links are rewritten before images so that the wrapping applies to the
/// final image markup.
pub struct MarkdownRenderer {
    config: RenderConfig,
    resolver: Arc<dyn ImageUrlResolver>,
}

impl MarkdownRenderer {
    pub fn new(config: RenderConfig, resolver: Arc<dyn ImageUrlResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Render `content` to HTML. `post_url` is the canonical URL of the post,
    /// used only to wrap images.
    pub fn render(&self, content: &str, post_url: Option<&str>) -> Result<String, RenderError> {
        let options = self.config.options();
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, content, &options);

        if !self.config.allow_raw_html {
            neutralize_raw_html(root);
        }

        let mut links = Vec::new();
        let mut images = Vec::new();
        for node in root.descendants() {
            match &node.data.borrow().value {
                NodeValue::Link(link) => links.push((node, link.clone())),
                NodeValue::Image(image) => images.push((node, image.clone(), inside_link(node))),
                _ => {}
            }
        }

        for (node, link) in links {
            rewrite_link(&arena, node, &link);
        }

        for (node, image, linked) in images {
            // Nested anchors are invalid HTML: an image that already sits in
            // a link keeps that link instead of the post URL.
            let wrap = if linked { None } else { post_url };
            let fragment = self.image_fragment(&image, &alt_text(node), wrap);
            replace_with_html(&arena, node, fragment);
        }

        let mut out = Vec::with_capacity(content.len() * 2);
        comrak::format_html(root, &options, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn image_fragment(&self, image: &NodeLink, alt: &str, post_url: Option<&str>) -> String {
        let src = image.url.trim();
        if src.is_empty() {
            return html::invalid_image();
        }

        let url = if is_absolute(src) {
            src.to_string()
        } else {
            let path = src.strip_prefix('/').unwrap_or(src);
            match self.resolver.public_url(path) {
                Ok(Some(url)) if !url.trim().is_empty() => url,
                Ok(_) => {
                    tracing::debug!(src, "Image not found in storage");
                    return html::missing_image(src);
                }
                Err(e) => {
                    tracing::warn!(src, error = %e, "Image URL resolution failed");
                    return html::missing_image(src);
                }
            }
        };

        let img = html::image_tag(&url, alt, &image.title);
        match post_url {
            Some(post_url) => html::wrap_in_post_link(post_url, &img),
            None => img,
        }
    }
}

/// Targets that stay on the site: paths and in-page anchors.
fn is_site_relative(url: &str) -> bool {
    url.is_empty() || url.starts_with('/') || url.starts_with('#')
}

/// `src` values that already name a network location.
fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//")
}

fn is_dangerous(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    ["javascript:", "vbscript:", "file:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

fn inside_link<'a>(node: &'a AstNode<'a>) -> bool {
    node.ancestors()
        .skip(1)
        .any(|a| matches!(a.data.borrow().value, NodeValue::Link(_)))
}

fn alt_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut alt = String::new();
    for child in node.descendants().skip(1) {
        match &child.data.borrow().value {
            NodeValue::Text(text) => alt.push_str(text),
            NodeValue::Code(code) => alt.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => alt.push(' '),
            _ => {}
        }
    }
    alt
}

/// Turn author-written HTML into literal text.
fn neutralize_raw_html<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let mut ast = node.data.borrow_mut();
        let literal = match &ast.value {
            NodeValue::HtmlInline(raw) => raw.clone(),
            NodeValue::HtmlBlock(block) => block.literal.clone(),
            _ => continue,
        };
        ast.value = NodeValue::Text(literal);
    }
}

fn html_node<'a>(arena: &'a Arena<AstNode<'a>>, html: String) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(Ast::new(
        NodeValue::HtmlInline(html),
        LineColumn { line: 0, column: 0 },
    ))))
}

fn replace_with_html<'a>(arena: &'a Arena<AstNode<'a>>, node: &'a AstNode<'a>, html: String) {
    node.insert_before(html_node(arena, html));
    node.detach();
}

/// Re-emit an external link as raw opening and closing tags around its
/// original children.
fn rewrite_link<'a>(arena: &'a Arena<AstNode<'a>>, node: &'a AstNode<'a>, link: &NodeLink) {
    if is_site_relative(&link.url) {
        return;
    }

    let href = if is_dangerous(&link.url) { "" } else { link.url.as_str() };
    node.insert_before(html_node(arena, html::external_link_open(href, &link.title)));

    let children: Vec<_> = node.children().collect();
    for child in children {
        node.insert_before(child);
    }

    replace_with_html(arena, node, "</a>".to_string());
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::StorageError;

    /// Resolves everything except `missing.png` and records every call.
    #[derive(Default)]
    struct RecordingResolver {
        calls: Mutex<Vec<String>>,
    }

    impl ImageUrlResolver for RecordingResolver {
        fn public_url(&self, path: &str) -> Result<Option<String>, StorageError> {
            self.calls.lock().unwrap().push(path.to_string());
            if path == "missing.png" {
                return Ok(None);
            }
            Ok(Some(format!("https://cdn.test/post-images/{path}")))
        }
    }

    struct FailingResolver;

    impl ImageUrlResolver for FailingResolver {
        fn public_url(&self, _path: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("bucket unreachable".into()))
        }
    }

    fn renderer() -> (MarkdownRenderer, Arc<RecordingResolver>) {
        let resolver = Arc::new(RecordingResolver::default());
        let renderer = MarkdownRenderer::new(RenderConfig::default(), resolver.clone());
        (renderer, resolver)
    }

    fn render(markdown: &str) -> String {
        renderer().0.render(markdown, None).unwrap()
    }

    #[test]
    fn test_site_relative_links_untouched() {
        let html = render("[torneos](/torneos) y [arriba](#inicio)");
        assert!(html.contains(r#"<a href="/torneos">torneos</a>"#));
        assert!(html.contains(r##"<a href="#inicio">arriba</a>"##));
        assert!(!html.contains("target="));
    }

    #[test]
    fn test_external_link_opens_new_context() {
        let html = render("Ganó [por segunda vez](https://lichess.org/tournament/YquCFKrW) otra vez");
        assert!(html.contains(
            r#"<a href="https://lichess.org/tournament/YquCFKrW" target="_blank" rel="noopener noreferrer">por segunda vez</a>"#
        ));
        assert!(html.contains("otra vez"));
    }

    #[test]
    fn test_external_link_keeps_title_and_formatting() {
        let html = render(r#"[**club**](https://example.com "Sitio")"#);
        assert!(html.contains(
            r#"<a href="https://example.com" title="Sitio" target="_blank" rel="noopener noreferrer"><strong>club</strong></a>"#
        ));
    }

    #[test]
    fn test_autolink_is_external() {
        let html = render("Inscripciones en https://lichess.org/team/famaf");
        assert!(html.contains(r#"href="https://lichess.org/team/famaf" target="_blank""#));
    }

    #[test]
    fn test_dangerous_link_loses_href() {
        let html = render("[clic](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(">clic</a>"));
    }

    #[test]
    fn test_absolute_image_passthrough() {
        let (renderer, resolver) = renderer();
        let html = renderer.render("![alt](https://host/img.png)", None).unwrap();
        assert!(html.contains(r#"<img src="https://host/img.png" alt="alt""#));
        assert!(resolver.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_relative_image_resolved_without_leading_slash() {
        let (renderer, resolver) = renderer();
        let html = renderer.render("![Torneo del 22](/torneo-22-sept.png)", None).unwrap();
        assert!(html.contains(
            r#"<img src="https://cdn.test/post-images/torneo-22-sept.png" alt="Torneo del 22""#
        ));
        assert!(html.contains("border-radius: 12px;"));
        assert_eq!(*resolver.calls.lock().unwrap(), vec!["torneo-22-sept.png"]);
    }

    #[test]
    fn test_unresolvable_image_placeholder() {
        let html = render("![falta](/missing.png)");
        assert!(html.contains("[Imagen no encontrada: /missing.png]"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_resolver_failure_becomes_placeholder() {
        let renderer = MarkdownRenderer::new(RenderConfig::default(), Arc::new(FailingResolver));
        let html = renderer.render("![foto](fotos/ronda1.jpg)", None).unwrap();
        assert!(html.contains("[Imagen no encontrada: fotos/ronda1.jpg]"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_empty_src_never_reaches_resolver() {
        let (renderer, resolver) = renderer();
        let html = renderer.render("![rota]()", Some("https://club.example/posts/x")).unwrap();
        assert!(html.contains(r#"<div style="color: red; font-style: italic;">[Imagen no válida]</div>"#));
        assert!(!html.contains("<img"));
        assert!(resolver.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_image_wrapped_in_post_link() {
        let (renderer, _) = renderer();
        let post_url = "https://club.example/posts/torneo-22-sept";

        let wrapped = renderer.render("![a](/a.png)", Some(post_url)).unwrap();
        assert!(wrapped.contains(&format!(
            r#"<a href="{post_url}" style="display: block; text-decoration: none;"><img src="https://cdn.test/post-images/a.png""#
        )));

        let bare = renderer.render("![a](/a.png)", None).unwrap();
        assert!(!bare.contains("<a "));
    }

    #[test]
    fn test_linked_image_not_double_wrapped() {
        let (renderer, _) = renderer();
        let html = renderer
            .render("[![a](/a.png)](https://lichess.org)", Some("https://club.example/posts/x"))
            .unwrap();
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer"><img src="https://cdn.test/post-images/a.png""#));
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let html = render("El sobrino sigue imparable\ny gana otra vez");
        assert!(html.contains("El sobrino sigue imparable<br />"));
        assert_eq!(html.matches("<p>").count(), 1);
    }

    #[test]
    fn test_soft_breaks_when_disabled() {
        let config = RenderConfig {
            hard_breaks: false,
            ..RenderConfig::default()
        };
        let renderer = MarkdownRenderer::new(config, Arc::new(RecordingResolver::default()));
        let html = renderer.render("uno\ndos", None).unwrap();
        assert!(!html.contains("<br />"));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = render("| Ronda | Mesa |\n|---|---|\n| 1 | 4 |\n\n~~suspendido~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>suspendido</del>"));
    }

    #[test]
    fn test_alt_text_escaped() {
        let html = render(r#"![Final "blitz" & más](https://host/f.png)"#);
        assert!(html.contains(r#"alt="Final &quot;blitz&quot; &amp; más""#));
    }

    #[test]
    fn test_raw_html_escaped_by_default() {
        let html = render("<script>alert(1)</script>\n\ntexto <b>negrita</b>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;negrita&lt;/b&gt;"));
    }

    #[test]
    fn test_raw_html_allowed() {
        let config = RenderConfig {
            allow_raw_html: true,
            ..RenderConfig::default()
        };
        let renderer = MarkdownRenderer::new(config, Arc::new(RecordingResolver::default()));
        let html = renderer.render("texto <b>negrita</b>", None).unwrap();
        assert!(html.contains("<b>negrita</b>"));
    }

    #[test]
    fn test_concurrent_renders() {
        let (renderer, _) = renderer();
        std::thread::scope(|s| {
            for i in 0..4 {
                let renderer = &renderer;
                s.spawn(move || {
                    let html = renderer.render(&format!("![r{i}](/r{i}.png)"), None).unwrap();
                    assert!(html.contains(&format!("post-images/r{i}.png")));
                });
            }
        });
    }
}
