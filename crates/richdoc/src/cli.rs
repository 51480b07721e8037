//! Core logic of the `richdoc` command-line tool.
//!
//! - `richdoc convert`: stored value → document tree JSON
//! - `richdoc html`:    stored value → HTML
//! - `richdoc text`:    stored value → plain-text summary
//!
//! Each command reads the stored value from a file or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::adapter::Adapter;
use crate::config::{Config, PlainTextOptions, RenderOptions};
use crate::diagnostics::LogDiagnostics;
use crate::render::{plain_text, render_html};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reads the whole input; `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_owned(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

/// Loads a TOML config file; defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let display = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    Config::from_toml(&source).map_err(|source| CliError::Config {
        path: display,
        source,
    })
}

/// Reads a stored value and prints it back as a pretty document tree.
/// Recoveries are logged.
pub fn convert(input: &str) -> Result<String, CliError> {
    let doc = Adapter::with_diagnostics(LogDiagnostics).parse(input);
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn html(input: &str, options: &RenderOptions) -> String {
    let doc = Adapter::with_diagnostics(LogDiagnostics).parse(input);
    log::debug!("rendering {} top-level nodes", doc.nodes().len());
    render_html(&doc, options)
}

/// Input that is not JSON comes back byte for byte, surrounding whitespace
/// included.
pub fn text(input: &str, options: &PlainTextOptions) -> String {
    plain_text(input, options)
}

/// `--details` takes precedence over a `[plain_text]` placeholder from the
/// config file.
pub fn text_options(config: Config, details: bool) -> PlainTextOptions {
    if details {
        PlainTextOptions::details()
    } else {
        config.plain_text
    }
}
