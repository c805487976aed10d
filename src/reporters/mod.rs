//! Output reporters for Clairvoyance analysis results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors and probability bars
//! - `json` - Machine-readable JSON
//!
//! Either can carry the evidence [`explain`]ation.

pub mod explain;
mod json;
mod text;

pub use explain::{Confidence, Exclusion, Explanation, Reason, StatNote, Strength};

use crate::models::AnalysisReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render an analysis report in the specified format
pub fn report(report: &AnalysisReport, format: &str, with_explanation: bool) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt, with_explanation)
}

/// Render an analysis report using an OutputFormat enum
pub fn report_with_format(
    report: &AnalysisReport,
    format: OutputFormat,
    with_explanation: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, with_explanation),
        OutputFormat::Json => json::render(report, with_explanation),
    }
}
