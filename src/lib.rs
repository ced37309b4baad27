pub mod cli;
pub mod commands;
pub mod config;
pub mod configuration;
pub mod context;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod metrics;
pub mod registry;

pub use config::Settings;
pub use configuration::{Configuration, PositionEncoding};
pub use context::IndexerContext;
pub use error::ConfigurationError;
pub use indexer::IndexablePath;
pub use registry::ConfigurationRegistry;
