//! Logging configuration and initialization for ruby-indexer.
//!
//! Provides file-based logging with rotation and optional stderr output.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const DEFAULT_DIRECTIVE: &str = "ruby_indexer=info";

/// Guard that must be held for the lifetime of the application.
/// When dropped, flushes any pending log writes.
#[must_use = "Dropping this guard will stop logging - keep it alive for the program's lifetime"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    _stderr_guard: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging subsystem based on configuration.
///
/// Returns a guard that must be kept alive for the duration of the program.
pub fn init_logging(config: &LoggingConfig, workspace_root: &Path) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut file_guard = None;
    let mut stderr_guard = None;

    if config.enabled {
        let log_dir = resolve_log_dir(&config.directory, workspace_root);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let rotation = parse_rotation(&config.rotation).unwrap_or_else(|| {
            eprintln!(
                "ruby-indexer: ignoring log rotation {:?}, rotating daily",
                config.rotation
            );
            Rotation::DAILY
        });
        let file_appender = RollingFileAppender::new(rotation, &log_dir, &config.file_prefix);
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        layers.push(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(parse_level(&config.level))
                .boxed(),
        );
    }

    if config.stderr {
        let stderr_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let (non_blocking_stderr, guard) = tracing_appender::non_blocking(std::io::stderr());
        stderr_guard = Some(guard);

        layers.push(
            fmt::layer()
                .with_writer(non_blocking_stderr)
                .with_target(false)
                .with_filter(stderr_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        _stderr_guard: stderr_guard,
    })
}

fn resolve_log_dir(directory: &Path, workspace_root: &Path) -> std::path::PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        workspace_root.join(directory)
    }
}

/// File filter for this crate at `level`; unknown levels fall back to the
/// stderr default so a typo never silences the log file.
fn parse_level(level: &str) -> EnvFilter {
    match level.parse::<Level>() {
        Ok(level) => EnvFilter::new(format!("ruby_indexer={}", level.as_str().to_lowercase())),
        Err(_) => {
            eprintln!(
                "ruby-indexer: ignoring log level {:?}, using {}",
                level, DEFAULT_DIRECTIVE
            );
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }
    }
}

fn parse_rotation(rotation: &str) -> Option<Rotation> {
    let rotation = match rotation.to_ascii_lowercase().as_str() {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        "never" => Rotation::NEVER,
        _ => return None,
    };
    Some(rotation)
}

/// Initialize stderr logging with defaults, for errors raised before the
/// settings file is loaded.
pub fn init_early_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)))
        .with(fmt::layer().with_target(false))
        .try_init();
}
