use anyhow::{Context, Result};

use crate::context::IndexerContext;

/// Print the effective configuration
pub fn run(context: &IndexerContext, json: bool) -> Result<()> {
    let configuration = context.configuration();

    if json {
        let output = serde_json::to_string_pretty(configuration.as_ref())
            .context("Failed to serialize configuration")?;
        println!("{}", output);
        return Ok(());
    }

    println!("Workspace: {}", configuration.workspace_path().display());
    println!("Encoding:  {}", configuration.encoding());
    print_list("Included patterns", configuration.included_patterns());
    print_list("Excluded patterns", configuration.excluded_patterns());
    print_list("Included gems", configuration.included_gems());
    print_list("Excluded gems", configuration.excluded_gems());
    print_list(
        "Excluded magic comments",
        configuration.excluded_magic_comments(),
    );

    Ok(())
}

fn print_list(title: &str, values: &[String]) {
    println!();
    println!("{}:", title);
    if values.is_empty() {
        println!("  (none)");
    }
    for value in values {
        println!("  {}", value);
    }
}
