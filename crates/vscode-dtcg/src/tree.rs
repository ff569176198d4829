//! Nested token trees.
//!
//! Flat token sets are turned into trees keyed by path segment. Groups keep
//! the order in which their children were first inserted, so the serialized
//! JSON is fully determined by the iteration order handed to [`nest`].
//!
//! # Path conflicts
//!
//! Two variables can resolve to paths where one is a prefix of the other,
//! e.g. `--vscode-editor` (`vscode.editor`) and `--vscode-editor-background`
//! (`vscode.editor.background`). A node cannot be both a token and a group,
//! so [`ConflictPolicy`] decides what happens:
//!
//! - [`ConflictPolicy::Error`] fails with [`TreeError::PathConflict`].
//! - [`ConflictPolicy::Overwrite`] lets the later insertion win. A token
//!   replaces the group at its path; a group replaces a token in its way.
//!   The replaced node keeps its position among its siblings.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TreeError;
use crate::extract::FlatTokenSet;
use crate::path::TokenPath;
use crate::token::ColorToken;

/// Children of a group, in insertion order.
pub type TokenGroup = IndexMap<String, TokenNode>;

/// A node in a token tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Token(ColorToken),
    Group(TokenGroup),
}

impl TokenNode {
    pub fn as_token(&self) -> Option<&ColorToken> {
        match self {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(group) => Some(group),
            TokenNode::Token(_) => None,
        }
    }

    fn count_tokens(&self) -> usize {
        match self {
            TokenNode::Token(_) => 1,
            TokenNode::Group(group) => group.values().map(TokenNode::count_tokens).sum(),
        }
    }
}

/// What to do when two token paths collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail with [`TreeError::PathConflict`].
    #[default]
    Error,
    /// Last insertion wins.
    Overwrite,
}

/// A nested token tree, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTree {
    root: TokenGroup,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &TokenGroup {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of leaf tokens in the tree.
    pub fn token_count(&self) -> usize {
        self.root.values().map(TokenNode::count_tokens).sum()
    }

    /// Looks up a node by path segments.
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&TokenNode> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.root.get(first.as_ref())?;
        for segment in rest {
            node = node.as_group()?.get(segment.as_ref())?;
        }
        Some(node)
    }

    /// Looks up a token by dotted path, e.g. `"vscode.editor.background"`.
    pub fn token(&self, dotted: &str) -> Option<&ColorToken> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.get(&segments)?.as_token()
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Incrementally builds a [`TokenTree`], remembering which variable created
/// each path so conflicts can name both sides.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: TokenTree,
    owners: HashMap<Vec<String>, String>,
    policy: ConflictPolicy,
}

impl TreeBuilder {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Inserts `token` for variable `name` at `path`, creating groups on demand.
    pub fn insert(
        &mut self,
        name: &str,
        path: &TokenPath,
        token: ColorToken,
    ) -> Result<(), TreeError> {
        let segments = path.segments();
        let Some((leaf, parents)) = segments.split_last() else {
            return Ok(());
        };

        let policy = self.policy;
        let owners = &mut self.owners;
        let mut group = &mut self.tree.root;

        for (depth, segment) in parents.iter().enumerate() {
            let prefix = &segments[..=depth];
            let slot = group
                .entry(segment.clone())
                .or_insert_with(|| TokenNode::Group(TokenGroup::new()));

            if let TokenNode::Token(_) = slot {
                resolve_conflict(policy, owners, prefix, name)?;
                *slot = TokenNode::Group(TokenGroup::new());
                owners.insert(prefix.to_vec(), name.to_string());
            } else {
                owners
                    .entry(prefix.to_vec())
                    .or_insert_with(|| name.to_string());
            }

            group = match slot {
                TokenNode::Group(children) => children,
                TokenNode::Token(_) => unreachable!("token slots are replaced above"),
            };
        }

        match group.get(leaf) {
            Some(TokenNode::Group(_)) => resolve_conflict(policy, owners, segments, name)?,
            Some(TokenNode::Token(_)) if owners.get(segments).is_some_and(|o| o != name) => {
                resolve_conflict(policy, owners, segments, name)?
            }
            _ => {}
        }
        group.insert(leaf.clone(), TokenNode::Token(token));
        owners.insert(segments.to_vec(), name.to_string());
        Ok(())
    }

    pub fn finish(self) -> TokenTree {
        self.tree
    }
}

fn resolve_conflict(
    policy: ConflictPolicy,
    owners: &HashMap<Vec<String>, String>,
    prefix: &[String],
    incoming: &str,
) -> Result<(), TreeError> {
    let path = prefix.join(".");
    let existing = owners.get(prefix).cloned().unwrap_or_default();
    match policy {
        ConflictPolicy::Error => Err(TreeError::PathConflict {
            path,
            existing,
            incoming: incoming.to_string(),
        }),
        ConflictPolicy::Overwrite => {
            warn!(%path, %existing, %incoming, "token path conflict, overwriting");
            Ok(())
        }
    }
}

/// Nests a flat token set into a tree.
///
/// Names are visited in `key_order` when given, otherwise in the set's own
/// order. Names in `key_order` that the set does not contain are skipped.
pub fn nest(
    flat: &FlatTokenSet,
    key_order: Option<&[String]>,
    policy: ConflictPolicy,
) -> Result<TokenTree, TreeError> {
    let mut builder = TreeBuilder::new(policy);

    match key_order {
        Some(order) => {
            for name in order {
                if let Some(token) = flat.get(name) {
                    builder.insert(name, &TokenPath::resolve(name), token.clone())?;
                }
            }
        }
        None => {
            for (name, token) in flat {
                builder.insert(name, &TokenPath::resolve(name), token.clone())?;
            }
        }
    }

    Ok(builder.finish())
}
