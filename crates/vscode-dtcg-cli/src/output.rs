//! Writing token trees and the union report to disk.
//!
//! | File | Contents |
//! |------|----------|
//! | `<name>.tokens.json` | the source's own tokens |
//! | `<name>.union.tokens.json` | the source aligned to the union |
//! | `union.missing_report.json` | what each source lacked |

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use vscode_dtcg::{TokenTree, UnionReport};

pub const TOKENS_SUFFIX: &str = ".tokens.json";
pub const UNION_SUFFIX: &str = ".union.tokens.json";
pub const REPORT_FILE: &str = "union.missing_report.json";

/// Name of the default output directory.
const DEFAULT_OUT_DIR: &str = "tokens";

/// Picks the output directory: `out` if given, otherwise `tokens/` next to
/// the input.
pub fn resolve_out_dir(input: &Path, out: Option<&Path>) -> PathBuf {
    if let Some(out) = out {
        return out.to_path_buf();
    }
    let base = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new(""))
    };
    base.join(DEFAULT_OUT_DIR)
}

/// Writes output files into a single directory.
#[derive(Debug)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Creates the directory if needed.
    pub fn prepare(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            bail!(
                "output path \"{}\" exists and is not a directory",
                dir.display()
            );
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create \"{}\"", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `<name>.tokens.json`.
    pub fn write_tokens(&self, name: &str, tree: &TokenTree) -> Result<PathBuf> {
        let json = tree
            .to_json_string()
            .with_context(|| format!("failed to serialize tokens for \"{name}\""))?;
        self.write(&format!("{name}{TOKENS_SUFFIX}"), &json)
    }

    /// Writes `<name>.union.tokens.json`.
    pub fn write_union_tokens(&self, name: &str, tree: &TokenTree) -> Result<PathBuf> {
        let json = tree
            .to_json_string()
            .with_context(|| format!("failed to serialize union tokens for \"{name}\""))?;
        self.write(&format!("{name}{UNION_SUFFIX}"), &json)
    }

    /// Writes `union.missing_report.json`.
    pub fn write_report(&self, report: &UnionReport) -> Result<PathBuf> {
        let json = report
            .to_json_string()
            .context("failed to serialize union report")?;
        self.write(REPORT_FILE, &json)
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write \"{}\"", path.display()))?;
        info!(path = %path.display(), bytes = contents.len(), "wrote");
        Ok(path)
    }
}
