use anyhow::{Context, Result};
use clap::Parser;

use ruby_indexer::cli::{Cli, Commands};
use ruby_indexer::logging::{init_early_logging, init_logging};
use ruby_indexer::metrics;
use ruby_indexer::{IndexerContext, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    // Logging comes up before the settings are validated; `check` reports
    // settings errors itself.
    let _logging_guard = match Settings::load(&workspace) {
        Ok(settings) => Some(init_logging(&settings.logging, &workspace)?),
        Err(e) => {
            init_early_logging();
            tracing::warn!("Using default logging: {}", e);
            None
        }
    };

    tracing::debug!("Workspace: {}", workspace.display());

    metrics::register_metrics().context("Failed to register metrics")?;

    match cli.command {
        Commands::Init { force } => {
            ruby_indexer::commands::init::run(&workspace, force)?;
        }
        Commands::Check => {
            ruby_indexer::commands::check::run(&workspace, cli.encoding)?;
        }
        Commands::Show { json } => {
            let context = IndexerContext::from_settings(&workspace, cli.encoding)?;
            ruby_indexer::commands::show::run(&context, json)?;
        }
        Commands::List => {
            let context = IndexerContext::from_settings(&workspace, cli.encoding)?;
            ruby_indexer::commands::list::run(&context)?;
        }
        Commands::Stats { prometheus } => {
            let context = IndexerContext::from_settings(&workspace, cli.encoding)?;
            ruby_indexer::commands::stats::run(&context, prometheus)?;
        }
    }

    Ok(())
}
