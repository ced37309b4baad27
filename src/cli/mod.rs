use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::configuration::PositionEncoding;

#[derive(Parser)]
#[command(name = "ruby-indexer")]
#[command(author, version, about = "Inspect the indexing configuration of a Ruby workspace")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Unit for reported character offsets
    #[arg(short, long, global = true, value_enum)]
    pub encoding: Option<PositionEncoding>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default settings file to .ruby-indexer/config.toml
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every file selected for indexing
    List,

    /// Validate the settings file
    Check,

    /// Show configuration metrics
    Stats {
        /// Output in Prometheus format
        #[arg(long)]
        prometheus: bool,
    },
}
