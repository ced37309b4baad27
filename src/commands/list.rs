use anyhow::{Context, Result};

use crate::context::IndexerContext;

/// Print every indexable file with the path it is required by
pub fn run(context: &IndexerContext) -> Result<()> {
    let configuration = context.configuration();
    let indexables = configuration
        .indexables()
        .context("Failed to enumerate indexable files")?;

    for indexable in &indexables {
        match indexable.require_path() {
            Some(require_path) => {
                println!("{}\t{}", indexable.full_path.display(), require_path)
            }
            None => println!("{}", indexable.full_path.display()),
        }
    }

    eprintln!("{} indexable files", indexables.len());
    Ok(())
}
