use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Settings;
use crate::configuration::PositionEncoding;
use crate::context::IndexerContext;

/// Validate the workspace's settings file.
///
/// Returns an error describing the first problem found.
pub fn run(root: &Path, encoding: Option<PositionEncoding>) -> Result<()> {
    let path = Settings::path(root);
    if !Settings::exists(root) {
        println!("No settings file at {}, defaults apply", path.display());
    }

    let context = IndexerContext::from_settings(root, encoding)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    let configuration = context.configuration();

    println!("✓ Configuration is valid");
    println!(
        "  {} included / {} excluded patterns",
        configuration.included_patterns().len(),
        configuration.excluded_patterns().len()
    );
    println!(
        "  {} included / {} excluded gems",
        configuration.included_gems().len(),
        configuration.excluded_gems().len()
    );

    Ok(())
}
