use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::config::Settings;

/// Write a default settings file into `root`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn run(root: &Path, force: bool) -> Result<()> {
    if Settings::exists(root) && !force {
        bail!(
            "Settings already exist at {:?} (use --force to overwrite)",
            Settings::path(root)
        );
    }

    Settings::default().save(root)?;

    info!("Initialized settings in {:?}", Settings::config_dir(root));
    println!(
        "✓ Created {} with default settings",
        Settings::path(root).display()
    );
    println!("\nNext steps:");
    println!("  1. Add overrides under [indexing] (included_patterns, excluded_gems, ...)");
    println!("  2. Run 'ruby-indexer check' to validate them");
    println!("  3. Run 'ruby-indexer list' to see the selected files");

    Ok(())
}
