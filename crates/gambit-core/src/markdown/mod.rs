//! Markdown rendering for post bodies.
//!
//! Posts are stored as Markdown and rendered on every request into an HTML
//! fragment ready to embed in a page template. External links open in a new
//! browsing context and image references are resolved against the image
//! bucket, see [`MarkdownRenderer`].

mod html;
mod renderer;

pub use renderer::{MarkdownRenderer, RenderConfig, RenderError};
