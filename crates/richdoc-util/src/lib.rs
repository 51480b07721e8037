//! richdoc-util - helpers shared by the richdoc crates.
//!
//! Stored rich-text values were produced by a browser editor, so offsets into
//! their text count UTF-16 code units. The [`strings`] module slices Rust
//! strings by those offsets; [`shape`] answers small questions about the
//! shape of a parsed JSON value.

pub mod shape;
pub mod strings;

pub use shape::{array_property, has_own_property};
pub use strings::{is_blank, is_whitespace, Utf16Text};
