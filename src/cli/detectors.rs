//! Detectors command: list detectors and whether they are enabled

use anyhow::Result;
use console::style;
use std::path::Path;

use clairvoyance::config::{load_config_file, load_project_config};
use clairvoyance::detectors::{all_detectors, Detector};

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config_file(path)?,
        None => load_project_config(&std::env::current_dir()?),
    };
    let options = config.analysis_options();

    println!("\n{}\n", style("Detectors").bold());
    for detector in all_detectors() {
        let status = if options.is_enabled(detector.cipher()) {
            style("on ").green()
        } else {
            style("off").dim()
        };
        println!(
            "  {} {:<14} {}",
            status,
            style(detector.name()).cyan(),
            detector.description()
        );
    }
    println!(
        "\n{}",
        style("Disable with --disable <name> or in [detectors] of clairvoyance.toml").dim()
    );
    Ok(())
}
