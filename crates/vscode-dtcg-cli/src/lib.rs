//! Command-line front end for `vscode-dtcg`.
//!
//! The binary is a thin wrapper: [`args::Cli`] parses flags into
//! [`run::ConvertOptions`], [`run::run`] does the work, and
//! [`table::render_summary`] formats the result.

pub mod args;
pub mod output;
pub mod run;
pub mod scan;
pub mod table;

pub use args::Cli;
pub use run::{run, ConvertOptions, RunSummary};
