//! uiprobe CLI entry point.

mod args;
mod commands;

use clap::Parser;
use tracing::error;

use crate::args::{Cli, Commands};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Inspect(args) => commands::inspect(args),
        Commands::Analyze(args) => commands::analyze_screen(args),
        Commands::Query(args) => commands::query(args),
        Commands::Find(args) => commands::find(args),
        Commands::Diff(args) => commands::diff_dumps(args),
        Commands::Suggest(args) => commands::suggest_actions(args),
    }
}
