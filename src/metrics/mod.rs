//! Prometheus metrics for ruby-indexer
//!
//! Counts configuration lifecycle events and records the cost of
//! enumerating indexable files.

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Configurations constructed by a registry
    pub static ref CONFIGURATION_CONSTRUCTIONS: Counter = Counter::with_opts(
        Opts::new(
            "ruby_indexer_configuration_constructions_total",
            "Configurations constructed by a registry"
        )
    ).expect("Failed to create CONFIGURATION_CONSTRUCTIONS counter");

    /// Failed configuration constructions
    pub static ref CONFIGURATION_ERRORS: Counter = Counter::with_opts(
        Opts::new(
            "ruby_indexer_configuration_errors_total",
            "Failed configuration constructions"
        )
    ).expect("Failed to create CONFIGURATION_ERRORS counter");

    /// Files selected by the most recent enumeration
    pub static ref INDEXABLE_FILES: Gauge = Gauge::with_opts(
        Opts::new(
            "ruby_indexer_indexable_files",
            "Files selected by the most recent enumeration"
        )
    ).expect("Failed to create INDEXABLE_FILES gauge");

    /// Time to enumerate indexable files in seconds
    pub static ref WALK_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ruby_indexer_walk_duration_seconds",
            "Time to enumerate indexable files in seconds"
        ).buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0])
    ).expect("Failed to create WALK_LATENCY histogram");
}

/// Register all metrics with the global registry.
///
/// Call once at application startup; a second call fails with
/// `AlreadyReg`.
pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(CONFIGURATION_CONSTRUCTIONS.clone()))?;
    REGISTRY.register(Box::new(CONFIGURATION_ERRORS.clone()))?;
    REGISTRY.register(Box::new(INDEXABLE_FILES.clone()))?;
    REGISTRY.register(Box::new(WALK_LATENCY.clone()))?;
    Ok(())
}

/// Gather all metrics and encode them in Prometheus text format
///
/// Returns an empty string if encoding fails.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}

/// Current metric values, for the CLI stats command
pub struct MetricSnapshot {
    pub configuration_constructions: f64,
    pub configuration_errors: f64,
    pub indexable_files: f64,
    pub walks: u64,
    pub walk_latency_avg: f64,
}

impl MetricSnapshot {
    /// Capture the current state of all metrics
    pub fn capture() -> Self {
        Self {
            configuration_constructions: CONFIGURATION_CONSTRUCTIONS.get(),
            configuration_errors: CONFIGURATION_ERRORS.get(),
            indexable_files: INDEXABLE_FILES.get(),
            walks: WALK_LATENCY.get_sample_count(),
            walk_latency_avg: calculate_histogram_avg(&WALK_LATENCY),
        }
    }
}

fn calculate_histogram_avg(histogram: &Histogram) -> f64 {
    let count = histogram.get_sample_count();
    if count == 0 {
        return 0.0;
    }
    histogram.get_sample_sum() / count as f64
}
