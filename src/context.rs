//! Application context owning the configuration registry.
//!
//! The context initializes its registry eagerly, so the configuration is
//! built once, at startup, in a known order. Components receive the
//! configuration as an `Arc` handle from [`IndexerContext::configuration`].

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::configuration::{Configuration, PositionEncoding};
use crate::error::ConfigurationError;
use crate::registry::ConfigurationRegistry;

#[derive(Debug)]
pub struct IndexerContext {
    registry: ConfigurationRegistry,
    configuration: Arc<Configuration>,
}

impl IndexerContext {
    /// Create a context and initialize `registry` immediately
    pub fn new(registry: ConfigurationRegistry) -> Result<Self, ConfigurationError> {
        let configuration = registry.get_configuration()?;

        Ok(Self {
            registry,
            configuration,
        })
    }

    /// Create a context for the workspace at `root`, applying the
    /// `[indexing]` section of its settings file.
    pub fn from_settings(
        root: impl Into<PathBuf>,
        encoding: Option<PositionEncoding>,
    ) -> Result<Self, ConfigurationError> {
        let root = root.into();

        let registry = ConfigurationRegistry::with_initializer(move || {
            let settings = Settings::load(&root)?;

            let mut configuration = Configuration::with_workspace(root.clone())?;
            if let Some(encoding) = encoding {
                configuration.set_encoding(encoding);
            }
            configuration.apply_config(&settings.indexing)?;

            Ok(configuration)
        });

        let context = Self::new(registry)?;
        info!(
            "Loaded configuration for {}",
            context.configuration.workspace_path().display()
        );
        Ok(context)
    }

    /// Shared handle to the configuration
    pub fn configuration(&self) -> Arc<Configuration> {
        Arc::clone(&self.configuration)
    }

    pub fn registry(&self) -> &ConfigurationRegistry {
        &self.registry
    }
}
