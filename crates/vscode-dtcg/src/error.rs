//! Error types for the vscode-dtcg crate.
//!
//! Unparseable values and source lines are never errors; they are skipped
//! and counted. What remains are tree construction conflicts and failures
//! to read a source at all.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a token tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two variables resolve to paths where one is a prefix of the other.
    #[error("token path '{path}' is claimed by both '{existing}' and '{incoming}'")]
    PathConflict {
        /// Dotted path at which the two collide.
        path: String,
        /// Variable that was inserted first.
        existing: String,
        /// Variable whose insertion failed.
        incoming: String,
    },
}

/// Errors raised while reading a theme source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("failed to read \"{}\": {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Malformed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its top level is not a `name -> value` object.
    #[error("expected a top-level object of variables, found {found}")]
    NotAnObject { found: &'static str },

    /// The file extension does not name a supported format.
    #[error("unsupported source format: \"{}\"", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result type for vscode-dtcg operations.
pub type Result<T> = std::result::Result<T, Error>;
