//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use vscode_dtcg::ConflictPolicy;

use crate::run::ConvertOptions;

/// Convert VSCode theme variables into DTCG color tokens.
///
/// INPUT is a single theme file (.css, .json, .yaml, .yml) or a directory
/// of them. Each source is written to `<name>.tokens.json`. With two or more
/// sources, union-aligned `<name>.union.tokens.json` files and a
/// `union.missing_report.json` are written as well.
#[derive(Debug, Parser)]
#[command(name = "vscode-dtcg", version)]
pub struct Cli {
    /// Theme file or directory of theme files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory [default: <input dir>/tokens]
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Skip the union outputs
    #[arg(long)]
    pub no_union: bool,

    /// What to do when one variable's path is a prefix of another's
    #[arg(long, value_enum, default_value_t = ConflictArg::Error)]
    pub on_conflict: ConflictArg,

    /// Descend into subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Don't print the summary table
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Raw tracing filter directive; overrides -v and VSCODE_DTCG_LOG
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    /// Fail on the first conflict
    Error,
    /// Let the later variable win
    Overwrite,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Error => ConflictPolicy::Error,
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
        }
    }
}

impl Cli {
    /// Options for [`crate::run::run`].
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            input: self.input.clone(),
            out: self.out.clone(),
            union: !self.no_union,
            policy: self.on_conflict.into(),
            recursive: self.recursive,
        }
    }

    /// Log level implied by `-v`, used when no filter is given.
    pub fn default_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vscode-dtcg", "themes"]).unwrap();
        let options = cli.options();
        assert_eq!(options.input, PathBuf::from("themes"));
        assert_eq!(options.out, None);
        assert!(options.union);
        assert_eq!(options.policy, ConflictPolicy::Error);
        assert!(!options.recursive);
        assert!(!cli.quiet);
        assert_eq!(cli.default_level(), "warn");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "vscode-dtcg",
            "themes",
            "-o",
            "out",
            "--no-union",
            "--on-conflict",
            "overwrite",
            "--recursive",
            "-q",
            "-vv",
        ])
        .unwrap();
        let options = cli.options();
        assert_eq!(options.out, Some(PathBuf::from("out")));
        assert!(!options.union);
        assert_eq!(options.policy, ConflictPolicy::Overwrite);
        assert!(options.recursive);
        assert!(cli.quiet);
        assert_eq!(cli.default_level(), "debug");
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Cli::try_parse_from(["vscode-dtcg", "x", "--on-conflict", "merge"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["vscode-dtcg"]).is_err());
    }
}
