use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigurationError;

const CONFIG_DIR: &str = ".ruby-indexer";
const CONFIG_FILE: &str = "config.toml";

/// Contents of `.ruby-indexer/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Overrides passed to `Configuration::apply_config`
    #[serde(default)]
    pub indexing: toml::Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr (filtered by RUST_LOG)
    #[serde(default = "default_stderr")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory, relative to the workspace unless absolute
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: minutely, hourly, daily or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_stderr(),
            level: default_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_stderr() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "ruby-indexer.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Settings {
    /// Load settings from the workspace's .ruby-indexer directory.
    ///
    /// A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self, ConfigurationError> {
        let path = Self::path(root);

        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigurationError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigurationError::Parse { path, source })
    }

    /// Save settings to the workspace's .ruby-indexer directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = Self::config_dir(root);
        let config_path = Self::path(root);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize settings")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write settings to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .ruby-indexer directory
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Get the path to the settings file
    pub fn path(root: &Path) -> PathBuf {
        Self::config_dir(root).join(CONFIG_FILE)
    }

    /// Check if a settings file exists in the given workspace
    pub fn exists(root: &Path) -> bool {
        Self::path(root).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.logging.enabled);
        assert!(settings.logging.stderr);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.rotation, "daily");
        assert!(settings.indexing.is_empty());
    }

    #[test]
    fn test_save_and_load_settings() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.logging.level = "debug".to_string();
        settings.indexing.insert(
            "excluded_gems".to_string(),
            toml::Value::Array(vec![toml::Value::String("rubocop".to_string())]),
        );

        settings.save(dir.path()).unwrap();
        assert!(Settings::exists(dir.path()));

        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.indexing, settings.indexing);
    }

    #[test]
    fn test_load_missing_settings_returns_default() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();

        assert!(settings.indexing.is_empty());
        assert!(!Settings::exists(dir.path()));
    }

    #[test]
    fn test_load_partial_settings_fills_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(Settings::config_dir(dir.path())).unwrap();
        std::fs::write(
            Settings::path(dir.path()),
            "[indexing]\nincluded_patterns = [\"**/*.rake\"]\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.indexing.contains_key("included_patterns"));
    }

    #[test]
    fn test_load_malformed_settings() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(Settings::config_dir(dir.path())).unwrap();
        std::fs::write(Settings::path(dir.path()), "[logging\nlevel = ").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse { .. }));
    }
}
