//! Token path resolution.
//!
//! A variable name is mapped to a short hierarchical path under a fixed
//! `vscode` root. Only one level of grouping is ever produced:
//!
//! | Variable | Path |
//! |----------|------|
//! | `--vscode-foreground` | `vscode.foreground` |
//! | `--vscode-editor-background` | `vscode.editor.background` |
//! | `--vscode-editor-inactiveSelection-background` | `vscode.editor.inactiveSelection-background` |

use std::fmt;

/// First segment of every token path.
pub const ROOT_SEGMENT: &str = "vscode";

/// Name prefix stripped after the leading `--`.
const NAMESPACE_PREFIX: &str = "vscode-";

/// Ordered path segments for a token: `[root, name]` or `[root, group, leaf]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    /// Resolves a raw variable name into its path.
    ///
    /// A leading `--` and then a leading `vscode-` are each stripped once if
    /// present; neither is required. The remainder is split at its first
    /// hyphen into group and leaf.
    pub fn resolve(raw_name: &str) -> Self {
        let name = raw_name.strip_prefix("--").unwrap_or(raw_name);
        let name = name.strip_prefix(NAMESPACE_PREFIX).unwrap_or(name);

        let mut segments = vec![ROOT_SEGMENT.to_string()];
        match name.split_once('-') {
            Some((group, leaf)) => {
                segments.push(group.to_string());
                segments.push(leaf.to_string());
            }
            None => segments.push(name.to_string()),
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Shorthand for [`TokenPath::resolve`].
pub fn resolve_path(raw_name: &str) -> TokenPath {
    TokenPath::resolve(raw_name)
}
