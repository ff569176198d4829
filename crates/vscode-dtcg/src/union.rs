//! Union of several token sets.
//!
//! Every source is expanded to the full set of variable names seen across
//! all sources. Names a source lacks are filled with a transparent
//! placeholder and listed in that source's report entry, so the resulting
//! trees all have the same shape and can be compared key by key.
//!
//! Union keys are sorted by raw variable name, and every tree is built in
//! that order.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TreeError;
use crate::extract::FlatTokenSet;
use crate::token::ColorToken;
use crate::tree::{nest, ConflictPolicy, TokenTree};

/// Missing/present breakdown for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Union keys this source does not define, in union order.
    pub missing: Vec<String>,
    /// Number of union keys this source does define.
    pub present: usize,
}

/// The persisted `union.missing_report.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionReport {
    pub total_union_keys: usize,
    pub report: IndexMap<String, SourceReport>,
}

impl UnionReport {
    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Per-source union trees plus the shared report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionOutput {
    /// The sorted union of all variable names.
    pub keys: Vec<String>,
    /// One tree per source, in input order.
    pub trees: IndexMap<String, TokenTree>,
    pub report: UnionReport,
}

/// Sorted union of every name across `sets`.
pub fn union_keys<'a, I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a FlatTokenSet>,
{
    let keys: BTreeSet<&String> = sets.into_iter().flat_map(|set| set.keys()).collect();
    keys.into_iter().cloned().collect()
}

/// Merges named token sets into aligned union trees.
///
/// Intended for two or more sources; with fewer there is nothing to align,
/// and callers skip the union step entirely. Source names are expected to be
/// unique; a repeated name replaces the earlier entry.
pub fn merge<'a, I>(sources: I, policy: ConflictPolicy) -> Result<UnionOutput, TreeError>
where
    I: IntoIterator<Item = (&'a str, &'a FlatTokenSet)>,
{
    let sources: Vec<(&str, &FlatTokenSet)> = sources.into_iter().collect();
    let keys = union_keys(sources.iter().map(|(_, set)| *set));
    debug!(
        sources = sources.len(),
        keys = keys.len(),
        "computed union keys"
    );

    let mut output = UnionOutput {
        report: UnionReport {
            total_union_keys: keys.len(),
            report: IndexMap::new(),
        },
        ..UnionOutput::default()
    };

    for (name, set) in sources {
        let mut filled = FlatTokenSet::with_capacity(keys.len());
        let mut missing = Vec::new();

        for key in &keys {
            let token = match set.get(key) {
                Some(token) => token.clone(),
                None => {
                    missing.push(key.clone());
                    ColorToken::placeholder()
                }
            };
            filled.insert(key.clone(), token);
        }

        let tree = nest(&filled, Some(keys.as_slice()), policy)?;
        let present = keys.len() - missing.len();
        output.trees.insert(name.to_string(), tree);
        output
            .report
            .report
            .insert(name.to_string(), SourceReport { missing, present });
    }

    output.keys = keys;
    Ok(output)
}
