//! JSON reporter
//!
//! Outputs the full AnalysisReport as pretty-printed JSON, with the
//! explanation attached under `explanation` when requested.

use super::explain::{explain, Explanation};
use crate::models::AnalysisReport;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct ExplainedReport<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    explanation: Explanation,
}

/// Render report as JSON
pub fn render(report: &AnalysisReport, with_explanation: bool) -> Result<String> {
    if with_explanation {
        let explained = ExplainedReport {
            report,
            explanation: explain(report),
        };
        Ok(serde_json::to_string_pretty(&explained)?)
    } else {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
