//! End-to-end conversion of raw variables into token trees.
//!
//! Each source is converted on its own: extraction, then nesting in the
//! source's natural order. The union step only runs once every source has
//! been converted, and only when there are at least two of them.

use std::path::Path;

use tracing::debug;

use crate::error::{self, TreeError};
use crate::extract::{extract, Extraction, FlatTokenSet};
use crate::source::{read_source, RawVariables};
use crate::tree::{nest, ConflictPolicy, TokenTree};
use crate::union::{merge, UnionOutput};

/// Minimum number of sources for a union to be computed.
pub const MIN_UNION_SOURCES: usize = 2;

/// One converted source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConversion {
    pub name: String,
    pub extraction: Extraction,
    pub tree: TokenTree,
    /// Source lines or members the reader could not use.
    pub skipped_lines: usize,
}

impl SourceConversion {
    pub fn tokens(&self) -> &FlatTokenSet {
        &self.extraction.tokens
    }

    /// Leaf tokens in the nested tree.
    pub fn token_count(&self) -> usize {
        self.tree.token_count()
    }
}

/// Every converted source, plus the union when one was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub sources: Vec<SourceConversion>,
    pub union: Option<UnionOutput>,
}

/// Extracts and nests a single source.
pub fn convert_source(
    name: &str,
    raw: &RawVariables,
    policy: ConflictPolicy,
) -> Result<SourceConversion, TreeError> {
    let extraction = extract(raw);
    let tree = nest(&extraction.tokens, None, policy)?;
    debug!(
        source = name,
        tokens = tree.token_count(),
        non_color = extraction.non_color,
        foreign = extraction.foreign,
        "converted source"
    );
    Ok(SourceConversion {
        name: name.to_string(),
        extraction,
        tree,
        skipped_lines: 0,
    })
}

/// Reads a source file, then extracts and nests it.
pub fn convert_file(
    name: &str,
    path: &Path,
    policy: ConflictPolicy,
) -> error::Result<SourceConversion> {
    let parsed = read_source(path)?;
    let mut conversion = convert_source(name, &parsed.variables, policy)?;
    conversion.skipped_lines = parsed.skipped_lines;
    Ok(conversion)
}

/// Computes the union over already converted sources.
///
/// Returns `None` when there are fewer than [`MIN_UNION_SOURCES`].
pub fn union_of(
    conversions: &[SourceConversion],
    policy: ConflictPolicy,
) -> Result<Option<UnionOutput>, TreeError> {
    if conversions.len() < MIN_UNION_SOURCES {
        return Ok(None);
    }
    let sources = conversions
        .iter()
        .map(|c| (c.name.as_str(), &c.extraction.tokens));
    merge(sources, policy).map(Some)
}

/// Converts every source and, if requested, their union.
pub fn convert_all<'a, I>(
    sources: I,
    policy: ConflictPolicy,
    union: bool,
) -> Result<Conversion, TreeError>
where
    I: IntoIterator<Item = (&'a str, &'a RawVariables)>,
{
    let sources = sources
        .into_iter()
        .map(|(name, raw)| convert_source(name, raw, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let union = if union {
        union_of(&sources, policy)?
    } else {
        None
    };

    Ok(Conversion { sources, union })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawVariables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_convert_source_counts() {
        let conv = convert_source(
            "dark",
            &raw(&[
                ("--vscode-foreground", "#cccccc"),
                ("--vscode-font-family", "sans-serif"),
                ("--theme-accent", "#ff0000"),
            ]),
            ConflictPolicy::Error,
        )
        .unwrap();
        assert_eq!(conv.name, "dark");
        assert_eq!(conv.token_count(), 1);
        assert_eq!(conv.extraction.non_color, 1);
        assert_eq!(conv.extraction.foreign, 1);
    }

    #[test]
    fn test_single_source_has_no_union() {
        let dark = raw(&[("--vscode-foreground", "#cccccc")]);
        let conv = convert_all([("dark", &dark)], ConflictPolicy::Error, true).unwrap();
        assert_eq!(conv.sources.len(), 1);
        assert!(conv.union.is_none());
    }

    #[test]
    fn test_union_disabled() {
        let a = raw(&[("--vscode-a", "#000")]);
        let b = raw(&[("--vscode-b", "#000")]);
        let conv = convert_all([("a", &a), ("b", &b)], ConflictPolicy::Error, false).unwrap();
        assert!(conv.union.is_none());
    }

    #[test]
    fn test_union_computed_for_two_sources() {
        let a = raw(&[("--vscode-a", "#000")]);
        let b = raw(&[("--vscode-b", "#000")]);
        let conv = convert_all([("a", &a), ("b", &b)], ConflictPolicy::Error, true).unwrap();
        let union = conv.union.unwrap();
        assert_eq!(union.keys, ["--vscode-a", "--vscode-b"]);
        assert_eq!(union.report.report["a"].missing, ["--vscode-b"]);
    }

    #[test]
    fn test_convert_file_keeps_skipped_lines() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("dark.css");
        std::fs::write(&path, ":root {\n  --vscode-a: #000;\n  junk\n}\n").unwrap();

        let conv = convert_file("dark", &path, ConflictPolicy::Error).unwrap();
        assert_eq!(conv.token_count(), 1);
        assert_eq!(conv.skipped_lines, 1);
    }

    #[test]
    fn test_convert_file_missing() {
        let err = convert_file("x", Path::new("/nonexistent/x.css"), ConflictPolicy::Error)
            .unwrap_err();
        assert!(matches!(err, crate::Error::Source(_)));
    }

    #[test]
    fn test_convert_file_conflict() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("t.json");
        std::fs::write(
            &path,
            r##"{"--vscode-editor": "#000", "--vscode-editor-background": "#111"}"##,
        )
        .unwrap();

        let err = convert_file("t", &path, ConflictPolicy::Error).unwrap_err();
        assert!(matches!(err, crate::Error::Tree(TreeError::PathConflict { .. })));
    }

    #[test]
    fn test_no_sources() {
        let conv = convert_all(
            std::iter::empty::<(&str, &RawVariables)>(),
            ConflictPolicy::Error,
            true,
        )
        .unwrap();
        assert!(conv.sources.is_empty());
        assert!(conv.union.is_none());
    }
}
