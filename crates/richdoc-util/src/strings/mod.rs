//! String utilities.
//!
//! Provides UTF-16 offset slicing and whitespace predicates.

mod utf16;
mod util;

pub use utf16::Utf16Text;
pub use util::{is_blank, is_whitespace};
