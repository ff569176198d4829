use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vscode_dtcg_cli::{run, table::render_summary, Cli};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "VSCODE_DTCG_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli.options()) {
        Ok(summary) => {
            if !cli.quiet {
                print!("{}", render_summary(&summary.rows));
                println!("wrote {}", summary.out_dir.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only the summary.
fn init_logging(cli: &Cli) {
    let filter = match &cli.log_filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(cli.default_level())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
