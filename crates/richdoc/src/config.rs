//! Renderer options and their TOML file form.
//!
//! ```toml
//! [render]
//! placeholder_image = "/static/missing.png"
//! indent = "  "
//!
//! [plain_text]
//! placeholder = "No details available"
//! ```

use serde::Deserialize;

/// Plain-text fallback for description fields.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";
/// Plain-text fallback for details fields.
pub const DETAILS_PLACEHOLDER: &str = "No details available";

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Shown in place of images whose upload never completed.
    pub placeholder_image: String,
    pub link_target: String,
    pub link_rel: String,
    /// Indentation unit of the HTML output; empty for compact output.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
            link_target: "_blank".to_owned(),
            link_rel: "noopener noreferrer".to_owned(),
            indent: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlainTextOptions {
    /// Returned when content reduces to nothing.
    pub placeholder: String,
}

impl PlainTextOptions {
    pub fn details() -> Self {
        Self {
            placeholder: DETAILS_PLACEHOLDER.to_owned(),
        }
    }
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        Self {
            placeholder: DESCRIPTION_PLACEHOLDER.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub plain_text: PlainTextOptions,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
