//! richdoc: rich-text documents as stored by the agency site and back-office.
//!
//! Descriptions, landing pages and templates keep their rich text in a single
//! text column holding JSON in one of two formats: an editor tree
//! (`{"type": "doc", ...}`) or an older flat block list with an entity map.
//! This crate reads either into one [`Document`] and renders it.
//!
//! # Example
//!
//! ```
//! use richdoc::{parse_document, render_html, RenderOptions};
//!
//! let stored = r#"{
//!     "blocks": [{"type": "unstyled", "text": "see docs here",
//!                 "entityRanges": [{"key": 0, "offset": 4, "length": 4}]}],
//!     "entityMap": {"0": {"type": "LINK", "data": {"url": "http://z"}}}
//! }"#;
//! let doc = parse_document(stored);
//! assert_eq!(
//!     render_html(&doc, &RenderOptions::default()),
//!     r#"<p>see <a href="http://z" target="_blank" rel="noopener noreferrer">docs</a> here</p>"#
//! );
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod legacy;
pub mod render;

pub use adapter::{parse_document, Adapter, ContentFormat};
pub use config::{Config, PlainTextOptions, RenderOptions};
pub use diagnostics::{Diagnostic, DiagnosticSink, IgnoreDiagnostics, LogDiagnostics};
pub use document::{Block, Document, Inline, ListItem, Mark, MarkKind, Node};
pub use legacy::{convert_legacy, splice_entity_ranges, LegacyRecord};
pub use render::{plain_text, plain_text_of, render, render_html};
