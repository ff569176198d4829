//! Reading raw theme variables from source files.
//!
//! Three formats are understood, chosen by file extension:
//!
//! | Extension | Format | Shape |
//! |-----------|--------|-------|
//! | `.css` | [`SourceFormat::Css`] | `--name: value;` declarations, one or more per line |
//! | `.json` | [`SourceFormat::Json`] | `{ "--name": "value", ... }` |
//! | `.yaml`, `.yml` | [`SourceFormat::Yaml`] | `--name: value` mapping |
//!
//! Readers are forgiving: lines and members that don't fit are counted as
//! skipped instead of failing the whole file.

mod css;
mod mapping;

use std::path::Path;

use indexmap::IndexMap;

use crate::error::SourceError;

pub use css::parse_css;
pub use mapping::{parse_json, parse_yaml};

/// Raw `name -> value` pairs in declaration order.
///
/// A repeated name keeps its first position and takes the last value.
pub type RawVariables = IndexMap<String, String>;

/// Recognized source extensions, lowercase and without the dot.
pub const SOURCE_EXTENSIONS: &[&str] = &["css", "json", "yaml", "yml"];

/// Format of a theme source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Css,
    Json,
    Yaml,
}

impl SourceFormat {
    /// Picks a format from a file path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "css" => Some(SourceFormat::Css),
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Variables read from one source plus how many entries were unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSource {
    pub variables: RawVariables,
    pub skipped_lines: usize,
}

/// Parses source text in the given format.
pub fn parse_source(text: &str, format: SourceFormat) -> Result<ParsedSource, SourceError> {
    match format {
        SourceFormat::Css => Ok(parse_css(text)),
        SourceFormat::Json => parse_json(text),
        SourceFormat::Yaml => parse_yaml(text),
    }
}

/// Reads and parses a source file, picking the format from its extension.
pub fn read_source(path: &Path) -> Result<ParsedSource, SourceError> {
    let format = SourceFormat::from_path(path).ok_or_else(|| SourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_source(&text, format)
}
