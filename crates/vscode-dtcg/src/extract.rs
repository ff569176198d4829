//! Variable set extraction.
//!
//! Filters raw `name -> value` pairs down to the `--vscode-` namespace and
//! turns every value that parses as a color into a token.

use indexmap::IndexMap;
use tracing::debug;

use crate::color::parse_color;
use crate::token::{build_token, ColorToken};

/// Names must start with this to be considered at all.
pub const VARIABLE_PREFIX: &str = "--vscode-";

/// Tokens for one source, keyed by original variable name in input order.
pub type FlatTokenSet = IndexMap<String, ColorToken>;

/// Result of extracting one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// The tokens that were kept.
    pub tokens: FlatTokenSet,
    /// Entries dropped because their name is outside the namespace.
    pub foreign: usize,
    /// Namespace entries dropped because their value is not a color.
    pub non_color: usize,
}

impl Extraction {
    /// Total number of input entries that did not become tokens.
    pub fn dropped(&self) -> usize {
        self.foreign + self.non_color
    }
}

/// Extracts color tokens from raw variables.
///
/// The prefix test runs against the original name. Values that are not
/// recognized colors are skipped silently and only counted.
pub fn extract<I, K, V>(variables: I) -> Extraction
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut extraction = Extraction::default();

    for (name, value) in variables {
        let (name, value) = (name.as_ref(), value.as_ref());
        if !name.starts_with(VARIABLE_PREFIX) {
            extraction.foreign += 1;
            continue;
        }
        match parse_color(value) {
            Some(color) => {
                extraction
                    .tokens
                    .insert(name.to_string(), build_token(&color));
            }
            None => {
                debug!(variable = name, value, "skipping non-color value");
                extraction.non_color += 1;
            }
        }
    }

    extraction
}
