//! End-to-end tests: the runner against real directories, and the binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use vscode_dtcg::ConflictPolicy;
use vscode_dtcg_cli::{run, ConvertOptions};

const DARK_CSS: &str = r#":root {
  /* exported theme */
  --vscode-foreground: #cccccc;
  --vscode-font-family: -apple-system, "Segoe UI", sans-serif;
  --theme-accent: #ff0000;
  not a declaration
}
"#;

const LIGHT_JSON: &str = r##"{
  "--vscode-foreground": "#cccccc",
  "--vscode-editor-background": "#1e1e1e"
}"##;

fn themes() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dark.css"), DARK_CSS).unwrap();
    fs::write(temp_dir.path().join("light.json"), LIGHT_JSON).unwrap();
    temp_dir
}

fn options(input: &Path) -> ConvertOptions {
    ConvertOptions {
        input: input.to_path_buf(),
        out: None,
        union: true,
        policy: ConflictPolicy::Error,
        recursive: false,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Runner
// ============================================================================

#[test]
fn test_directory_with_union() {
    let dir = themes();
    let summary = run(&options(dir.path())).unwrap();
    let out = dir.path().join("tokens");
    assert_eq!(summary.out_dir, out);

    let names: Vec<_> = summary
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "dark.tokens.json",
            "light.tokens.json",
            "dark.union.tokens.json",
            "light.union.tokens.json",
            "union.missing_report.json",
        ]
    );

    let report = read_json(&out.join("union.missing_report.json"));
    assert_eq!(report["totalUnionKeys"], 2);
    assert_eq!(
        report["report"]["dark"]["missing"],
        serde_json::json!(["--vscode-editor-background"])
    );
    assert_eq!(report["report"]["dark"]["present"], 1);
    assert_eq!(report["report"]["light"]["missing"], serde_json::json!([]));
    assert_eq!(report["report"]["light"]["present"], 2);

    let dark_union = read_json(&out.join("dark.union.tokens.json"));
    let placeholder = &dark_union["vscode"]["editor"]["background"]["$value"];
    assert_eq!(placeholder["hex"], "#000000");
    assert_eq!(placeholder["alpha"], 0);
    assert_eq!(dark_union["vscode"]["foreground"]["$value"]["hex"], "#CCCCCC");
}

#[test]
fn test_summary_rows() {
    let dir = themes();
    let summary = run(&options(dir.path())).unwrap();

    let dark = &summary.rows[0];
    assert_eq!(dark.source, "dark");
    assert_eq!(dark.tokens, 1);
    assert_eq!(dark.skipped_lines, 1);
    assert_eq!(dark.non_color, 1);
    assert_eq!(dark.missing, Some(1));

    let light = &summary.rows[1];
    assert_eq!(light.source, "light");
    assert_eq!(light.tokens, 2);
    assert_eq!(light.missing, Some(0));
}

#[test]
fn test_single_file_skips_union() {
    let dir = themes();
    let summary = run(&options(&dir.path().join("light.json"))).unwrap();

    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.rows[0].missing, None);
    assert!(dir.path().join("tokens/light.tokens.json").is_file());
    assert!(!dir.path().join("tokens/union.missing_report.json").exists());
}

#[test]
fn test_no_union_flag() {
    let dir = themes();
    let summary = run(&ConvertOptions {
        union: false,
        ..options(dir.path())
    })
    .unwrap();
    assert_eq!(summary.written.len(), 2);
    assert!(summary.rows.iter().all(|row| row.missing.is_none()));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = themes();
    let first = run(&options(dir.path())).unwrap();
    let before: Vec<String> = first
        .written
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();

    // The output directory sits inside the input; generated files are ignored.
    let second = run(&options(dir.path())).unwrap();
    assert_eq!(first.written, second.written);
    let after: Vec<String> = second
        .written
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_explicit_out_dir() {
    let dir = themes();
    let out = TempDir::new().unwrap();
    let target = out.path().join("nested/tokens");
    let summary = run(&ConvertOptions {
        out: Some(target.clone()),
        ..options(dir.path())
    })
    .unwrap();
    assert_eq!(summary.out_dir, target);
    assert!(target.join("dark.tokens.json").is_file());
}

#[test]
fn test_conflict_policy() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("t.css"),
        "--vscode-editor: #000;\n--vscode-editor-background: #111;\n",
    )
    .unwrap();

    let err = run(&options(dir.path())).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("t.css"));
    assert!(message.contains("vscode.editor"));

    let summary = run(&ConvertOptions {
        policy: ConflictPolicy::Overwrite,
        ..options(dir.path())
    })
    .unwrap();
    let tree = read_json(&dir.path().join("tokens/t.tokens.json"));
    assert_eq!(tree["vscode"]["editor"]["background"]["$value"]["hex"], "#111111");
    assert_eq!(summary.rows[0].tokens, 1);
}

#[test]
fn test_earlier_outputs_survive_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.css"), "--vscode-a: #000;\n").unwrap();
    fs::write(dir.path().join("b.json"), "[1, 2]").unwrap();

    let err = run(&options(dir.path())).unwrap_err();
    assert!(format!("{err:#}").contains("b.json"));
    assert!(dir.path().join("tokens/a.tokens.json").is_file());
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_binary_prints_summary() {
    let dir = themes();
    let mut cmd = cargo_bin_cmd!("vscode-dtcg");
    cmd.arg(dir.path());

    cmd.assert().success().stdout(
        predicate::str::contains("source")
            .and(predicate::str::contains("missing"))
            .and(predicate::str::contains("dark"))
            .and(predicate::str::contains("wrote")),
    );
}

#[test]
fn test_binary_quiet() {
    let dir = themes();
    let mut cmd = cargo_bin_cmd!("vscode-dtcg");
    cmd.arg(dir.path()).arg("--quiet");

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert!(dir.path().join("tokens/light.union.tokens.json").is_file());
}

#[test]
fn test_binary_missing_input() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("vscode-dtcg");
    cmd.arg(dir.path().join("nope"));

    cmd.assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: input not found"));
}

#[test]
fn test_binary_out_path_is_file() {
    let dir = themes();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let mut cmd = cargo_bin_cmd!("vscode-dtcg");
    cmd.arg(dir.path()).arg("--out").arg(&blocker);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}
