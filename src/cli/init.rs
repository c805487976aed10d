//! Init command - write an example configuration file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use clairvoyance::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Tune toggles and calibration", style(CONFIG_FILE_NAME).cyan());
    println!(
        "  {} Classify a sample",
        style("clairvoyance analyze --file cipher.txt").cyan()
    );

    Ok(())
}
