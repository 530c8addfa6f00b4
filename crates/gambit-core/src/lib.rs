//! # Gambit Core
//!
//! The domain layer of the chess-club content backend.
//! Entities, ports, the Markdown post renderer and pure content helpers live
//! here; nothing in this crate performs I/O.

pub mod content;
pub mod domain;
pub mod error;
pub mod markdown;
pub mod ports;

pub use error::DomainError;
pub use markdown::{MarkdownRenderer, RenderConfig, RenderError};
