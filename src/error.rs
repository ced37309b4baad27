//! Errors raised while building or loading an indexing configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while constructing, loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The registry's construction procedure failed.
    #[error("Failed to construct configuration")]
    Construction(#[source] Box<ConfigurationError>),

    /// The current directory could not be resolved as the default workspace.
    #[error("Could not resolve the workspace directory: {0}")]
    WorkspaceUnavailable(#[source] std::io::Error),

    /// The workspace path does not point at a directory.
    #[error("Workspace {0} is not a directory")]
    WorkspaceNotFound(PathBuf),

    /// The configuration table contained keys that are not understood.
    #[error("Unknown keys: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),

    /// A configuration value had the wrong shape.
    #[error("Expected {key} to be {expected}, but got {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// A file pattern is not a valid glob.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The excluded magic comments did not compile into a matcher.
    #[error("Invalid magic comment matcher: {0}")]
    MagicCommentRegex(#[from] regex::Error),

    /// The settings file exists but could not be read.
    #[error("Failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for this crate.
    #[error("Failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigurationError {
    /// Wrap an error raised by a construction procedure.
    pub fn construction(error: ConfigurationError) -> Self {
        Self::Construction(Box::new(error))
    }
}
