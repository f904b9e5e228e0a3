//! Mapper configuration.
//!
//! Which tags start a new visual line, which tags are manual breaks and what
//! marks an element as editable. Hosts with unusual markup (custom elements
//! that render as blocks, editors that use their own editable marker) load
//! an override from JSON or TOML.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Tags rendered as block boxes by default user-agent stylesheets.
pub const DEFAULT_BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "thead",
    "tfoot",
    "tr",
    "td",
    "th",
    "ul",
];

pub const DEFAULT_BREAK_TAGS: &[&str] = &["br"];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("io error reading {path}")]
    #[diagnostic(code(textmap::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config")]
    #[diagnostic(code(textmap::config::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML config")]
    #[diagnostic(code(textmap::config::toml))]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format: {0}")]
    #[diagnostic(
        code(textmap::config::format),
        help("use a .json or .toml file")
    )]
    UnsupportedFormat(String),

    #[error("tag {0:?} is listed as both a block and a manual break")]
    #[diagnostic(code(textmap::config::conflict))]
    ConflictingTag(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Elements that start a new visual line.
    pub block_tags: Vec<SmolStr>,
    /// Elements that force exactly one newline and hold no text.
    pub break_tags: Vec<SmolStr>,
    /// Attribute that marks an element as an editable anchor.
    pub editable_attribute: SmolStr,
    /// Attribute values (case-insensitive) that count as editable.
    pub editable_values: Vec<SmolStr>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            block_tags: DEFAULT_BLOCK_TAGS.iter().copied().map(SmolStr::new).collect(),
            break_tags: DEFAULT_BREAK_TAGS.iter().copied().map(SmolStr::new).collect(),
            editable_attribute: SmolStr::new_static("contenteditable"),
            editable_values: vec![
                SmolStr::new_static(""),
                SmolStr::new_static("true"),
                SmolStr::new_static("plaintext-only"),
            ],
        }
    }
}

impl MapperConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Load from a file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&read()?),
            Some("toml") => Self::from_toml_str(&read()?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// A tag can't be both kinds; the classification must be unambiguous
    /// for extraction and location to agree.
    fn validate(self) -> Result<Self, ConfigError> {
        for tag in &self.break_tags {
            if self
                .block_tags
                .iter()
                .any(|block| block.eq_ignore_ascii_case(tag))
            {
                return Err(ConfigError::ConflictingTag(tag.clone()));
            }
        }
        Ok(self)
    }
}
