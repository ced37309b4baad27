//! Stats command for displaying configuration metrics

use anyhow::{Context, Result};

use crate::context::IndexerContext;
use crate::metrics::{gather_metrics, MetricSnapshot};

/// Run the stats command
///
/// Enumerates indexable files first so the gauges reflect the workspace.
///
/// # Arguments
/// * `prometheus` - If true, output in Prometheus text format
pub fn run(context: &IndexerContext, prometheus: bool) -> Result<()> {
    context
        .configuration()
        .indexables()
        .context("Failed to enumerate indexable files")?;

    if prometheus {
        print!("{}", gather_metrics());
        return Ok(());
    }

    let snapshot = MetricSnapshot::capture();

    println!("ruby-indexer Statistics");
    println!("=======================\n");

    println!("Configuration:");
    println!(
        "  Constructions: {:.0}",
        snapshot.configuration_constructions
    );
    println!("  Failures:      {:.0}", snapshot.configuration_errors);
    println!();

    println!("Indexables:");
    println!("  Files:           {:.0}", snapshot.indexable_files);
    println!("  Walks:           {}", snapshot.walks);
    if snapshot.walks > 0 {
        println!("  Average latency: {:.3}s", snapshot.walk_latency_avg);
    }

    Ok(())
}
