//! Read-only renderers.
//!
//! [`structured`] turns a [`Document`](crate::Document) into a JsonML display
//! tree (and HTML); [`plain_text`] reduces a stored value to a prose summary
//! for list-page previews.

pub mod plain_text;
pub mod structured;

pub use plain_text::{plain_text, plain_text_of};
pub use structured::{render, render_html};
