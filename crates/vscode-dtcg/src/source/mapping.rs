//! JSON and YAML sources: a flat object of `name -> value` strings.
//!
//! In YAML, `#` starts a comment, so hex values must be quoted:
//!
//! ```yaml
//! --vscode-foreground: '#cccccc'   # a string
//! --vscode-background: #1e1e1e     # null: the value is a comment
//! ```
//!
//! A name with a null value is counted as skipped and logged at `warn`.

use indexmap::IndexMap;
use serde_json::error::Category;
use tracing::{debug, warn};

use super::ParsedSource;
use crate::error::SourceError;

/// Parses a JSON object. String members become variables; any other member
/// counts as skipped.
pub fn parse_json(text: &str) -> Result<ParsedSource, SourceError> {
    // Deserializing straight into an IndexMap keeps document order.
    let members: IndexMap<String, serde_json::Value> =
        serde_json::from_str(text).map_err(|e| match e.classify() {
            Category::Data => match serde_json::from_str::<serde_json::Value>(text) {
                Ok(value) => SourceError::NotAnObject {
                    found: json_kind(&value),
                },
                Err(e) => SourceError::Json(e),
            },
            _ => SourceError::Json(e),
        })?;

    let mut parsed = ParsedSource::default();
    for (name, value) in members {
        match value {
            serde_json::Value::String(value) => {
                parsed.variables.insert(name, value);
            }
            other => {
                debug!(variable = %name, kind = json_kind(&other), "skipping non-string member");
                parsed.skipped_lines += 1;
            }
        }
    }
    Ok(parsed)
}

/// Parses a YAML mapping. An empty document is an empty source.
pub fn parse_yaml(text: &str) -> Result<ParsedSource, SourceError> {
    if text.trim().is_empty() {
        return Ok(ParsedSource::default());
    }
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    let mapping = match document {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(ParsedSource::default()),
        other => {
            return Err(SourceError::NotAnObject {
                found: yaml_kind(&other),
            })
        }
    };

    let mut parsed = ParsedSource::default();
    for (key, value) in mapping {
        match (key, value) {
            (serde_yaml::Value::String(name), serde_yaml::Value::String(value)) => {
                parsed.variables.insert(name, value);
            }
            (serde_yaml::Value::String(name), serde_yaml::Value::Null) => {
                warn!(variable = %name, "value is null; quote hex colors in YAML sources");
                parsed.skipped_lines += 1;
            }
            (key, value) => {
                debug!(key = ?key, kind = yaml_kind(&value), "skipping non-string entry");
                parsed.skipped_lines += 1;
            }
        }
    }
    Ok(parsed)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
