//! Input discovery.
//!
//! The input is either one theme file or a directory of them. Each file
//! becomes a source named after its file stem:
//!
//! | Path | Source name |
//! |------|-------------|
//! | `themes/dark.css` | `"dark"` |
//! | `themes/hc/high-contrast.json` | `"high-contrast"` |
//!
//! Names must be unique across the whole input. Files this tool writes are
//! never picked up, so an output directory inside the input is harmless.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use vscode_dtcg::SourceFormat;

use crate::output::{REPORT_FILE, TOKENS_SUFFIX};

/// A theme file found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name without its extension.
    pub name: String,
    pub path: PathBuf,
    pub format: SourceFormat,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("input not found: \"{}\"", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("unsupported file: \"{}\" (expected .css, .json, .yaml or .yml)", .path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("no supported files in \"{}\"", .path.display())]
    NoSupportedFiles { path: PathBuf },

    #[error(
        "source name \"{name}\" is used by both \"{}\" and \"{}\"",
        .existing.display(),
        .conflicting.display()
    )]
    Collision {
        name: String,
        existing: PathBuf,
        conflicting: PathBuf,
    },

    #[error("failed to read \"{}\": {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

/// Finds the sources named by `input`, sorted by path.
pub fn discover(input: &Path, recursive: bool) -> Result<Vec<SourceFile>, ScanError> {
    if !input.exists() {
        return Err(ScanError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    if !input.is_dir() {
        let file = source_file(input).ok_or_else(|| ScanError::UnsupportedFile {
            path: input.to_path_buf(),
        })?;
        return Ok(vec![file]);
    }

    let mut files = Vec::new();
    walk_dir(input, recursive, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));

    if files.is_empty() {
        return Err(ScanError::NoSupportedFiles {
            path: input.to_path_buf(),
        });
    }

    check_collisions(&files)?;
    Ok(files)
}

fn walk_dir(dir: &Path, recursive: bool, files: &mut Vec<SourceFile>) -> Result<(), ScanError> {
    let io_error = |e: std::io::Error| ScanError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();

        if path.is_dir() {
            if recursive {
                walk_dir(&path, recursive, files)?;
            }
        } else if path.is_file() {
            if is_generated(&path) {
                debug!(path = %path.display(), "skipping generated file");
                continue;
            }
            if let Some(file) = source_file(&path) {
                files.push(file);
            }
        }
    }

    Ok(())
}

fn source_file(path: &Path) -> Option<SourceFile> {
    let format = SourceFormat::from_path(path)?;
    let name = path.file_stem()?.to_str()?.to_string();
    Some(SourceFile {
        name,
        path: path.to_path_buf(),
        format,
    })
}

/// Files written by a previous run.
fn is_generated(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // The union suffix ends with the tokens suffix.
    file_name.ends_with(TOKENS_SUFFIX) || file_name == REPORT_FILE
}

fn check_collisions(files: &[SourceFile]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for file in files {
        if let Some(existing) = seen.insert(&file.name, &file.path) {
            return Err(ScanError::Collision {
                name: file.name.clone(),
                existing: existing.to_path_buf(),
                conflicting: file.path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    // =========================================================================
    // Single file
    // =========================================================================

    #[test]
    fn test_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "dark.css");

        let files = discover(&path, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "dark");
        assert_eq!(files[0].format, SourceFormat::Css);
    }

    #[test]
    fn test_single_unsupported_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "notes.txt");

        let err = discover(&path, false).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedFile { .. }));
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let err = discover(&temp_dir.path().join("nope"), false).unwrap_err();
        assert!(matches!(err, ScanError::InputNotFound { .. }));
    }

    // =========================================================================
    // Directories
    // =========================================================================

    #[test]
    fn test_directory_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "light.json");
        touch(temp_dir.path(), "dark.css");
        touch(temp_dir.path(), "hc.yml");
        touch(temp_dir.path(), "README.md");

        let files = discover(temp_dir.path(), false).unwrap();
        assert_eq!(names(&files), ["dark", "hc", "light"]);
    }

    #[test]
    fn test_generated_files_excluded() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "dark.css");
        touch(temp_dir.path(), "dark.tokens.json");
        touch(temp_dir.path(), "dark.union.tokens.json");
        touch(temp_dir.path(), "union.missing_report.json");

        let files = discover(temp_dir.path(), false).unwrap();
        assert_eq!(names(&files), ["dark"]);
    }

    #[test]
    fn test_subdirectories_need_recursive() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "dark.css");
        touch(temp_dir.path(), "extra/light.css");

        let flat = discover(temp_dir.path(), false).unwrap();
        assert_eq!(names(&flat), ["dark"]);

        let deep = discover(temp_dir.path(), true).unwrap();
        assert_eq!(names(&deep), ["dark", "light"]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "notes.txt");

        let err = discover(temp_dir.path(), false).unwrap_err();
        assert!(matches!(err, ScanError::NoSupportedFiles { .. }));
    }

    #[test]
    fn test_name_collision() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "dark.css");
        touch(temp_dir.path(), "dark.json");

        let err = discover(temp_dir.path(), false).unwrap_err();
        match err {
            ScanError::Collision {
                name,
                existing,
                conflicting,
            } => {
                assert_eq!(name, "dark");
                assert!(existing.ends_with("dark.css"));
                assert!(conflicting.ends_with("dark.json"));
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_collision_across_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a/dark.css");
        touch(temp_dir.path(), "b/dark.css");

        let err = discover(temp_dir.path(), true).unwrap_err();
        assert!(err.to_string().contains("\"dark\""));
    }
}
