//! Single-instance holder for the indexing configuration.
//!
//! A [`ConfigurationRegistry`] builds its [`Configuration`] on first access
//! and returns that same instance to every later caller, from any thread.
//! The registry is an ordinary owned value: the application context creates
//! one at startup and hands out the configuration handle, so there is no
//! process-wide global.
//!
//! # States
//!
//! The registry is either uninitialized or initialized. The first successful
//! [`get_configuration`](ConfigurationRegistry::get_configuration) moves it
//! to initialized, and it stays there. A failed construction leaves it
//! uninitialized and returns [`ConfigurationError::Construction`].

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, error};

use crate::configuration::Configuration;
use crate::error::ConfigurationError;
use crate::metrics::{CONFIGURATION_CONSTRUCTIONS, CONFIGURATION_ERRORS};

type Initializer = Box<dyn Fn() -> Result<Configuration, ConfigurationError> + Send + Sync>;

/// Lazily constructs and then shares exactly one [`Configuration`]
pub struct ConfigurationRegistry {
    instance: OnceLock<Arc<Configuration>>,
    /// Serializes the check-then-construct step of the first access
    init_lock: Mutex<()>,
    initializer: Initializer,
}

impl ConfigurationRegistry {
    /// Registry that builds a default configuration rooted at the current
    /// directory
    pub fn new() -> Self {
        Self::with_initializer(Configuration::new)
    }

    /// Registry that builds its configuration with `initializer`
    pub fn with_initializer<F>(initializer: F) -> Self
    where
        F: Fn() -> Result<Configuration, ConfigurationError> + Send + Sync + 'static,
    {
        Self {
            instance: OnceLock::new(),
            init_lock: Mutex::new(()),
            initializer: Box::new(initializer),
        }
    }

    /// Return the shared configuration, constructing it on first use.
    ///
    /// Every successful call returns a handle to the same instance
    /// (`Arc::ptr_eq` holds between any two results).
    pub fn get_configuration(&self) -> Result<Arc<Configuration>, ConfigurationError> {
        if let Some(configuration) = self.instance.get() {
            return Ok(Arc::clone(configuration));
        }

        // A poisoned lock only means another first caller panicked inside
        // the initializer; the cell is still empty and safe to fill.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(configuration) = self.instance.get() {
            return Ok(Arc::clone(configuration));
        }

        let configuration = (self.initializer)().map_err(|e| {
            CONFIGURATION_ERRORS.inc();
            error!("Configuration construction failed: {}", e);
            ConfigurationError::construction(e)
        })?;

        CONFIGURATION_CONSTRUCTIONS.inc();
        debug!(
            "Initialized configuration for {}",
            configuration.workspace_path().display()
        );

        Ok(Arc::clone(
            self.instance.get_or_init(|| Arc::new(configuration)),
        ))
    }

    /// Whether the configuration has been constructed
    pub fn is_initialized(&self) -> bool {
        self.instance.get().is_some()
    }
}

impl Default for ConfigurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigurationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRegistry")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
