//! Text (terminal) reporter with colors and formatting

use super::explain::{explain, Confidence, Strength};
use crate::detectors::DetectorDetails;
use crate::models::{AnalysisReport, CipherType};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BAR_WIDTH: usize = 30;
/// Characters of display text and decryption shown
const SNIPPET_LEN: usize = 60;

/// Probability color
fn probability_color(probability: f64) -> &'static str {
    if probability >= 0.5 {
        "\x1b[32m" // Green
    } else if probability >= 0.2 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[90m" // Gray
    }
}

fn confidence_color(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "\x1b[32m",
        Confidence::Medium => "\x1b[33m",
        Confidence::Low => "\x1b[31m",
    }
}

fn strength_color(strength: Strength) -> &'static str {
    match strength {
        Strength::VeryStrong | Strength::Strong => "\x1b[32m",
        Strength::Medium => "\x1b[33m",
        Strength::Weak => "\x1b[90m",
    }
}

fn bar(probability: f64) -> String {
    let filled = ((probability * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_LEN {
        format!("{}...", text.chars().take(SNIPPET_LEN).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Decryption preview of the winner, when its detector recovered a key
fn winner_preview(report: &AnalysisReport) -> Option<&str> {
    match &report.outcome(report.winner.cipher)?.details {
        DetectorDetails::Caesar(fit) => Some(&fit.preview),
        DetectorDetails::Affine(fit) => Some(&fit.preview),
        DetectorDetails::Vigenere(analysis) => analysis.preview.as_deref(),
        _ => None,
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport, with_explanation: bool) -> Result<String> {
    let mut out = String::new();
    let winner = &report.winner;

    // Header
    out.push_str(&format!("\n{BOLD}Clairvoyance Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Text: {DIM}{}{RESET}\n",
        snippet(&report.display_text)
    ));
    out.push_str(&format!(
        "Letters: {}  Stripped: {}\n\n",
        report.length, report.stripped
    ));

    let win_c = probability_color(winner.probability);
    out.push_str(&format!(
        "Most likely: {win_c}{BOLD}{}{RESET} ({:.1}%)\n",
        winner.cipher.display_name(),
        winner.probability * 100.0
    ));
    out.push_str(&format!("  {DIM}{}{RESET}\n\n", winner.description));

    // Probability bars
    out.push_str(&format!("{BOLD}PROBABILITIES{RESET}\n"));
    for (cipher, probability) in report.ranking() {
        let color = probability_color(probability);
        let marker = if report.degraded.contains(&cipher) {
            format!("  {DIM}(degraded){RESET}")
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {:<14} {color}{}{RESET} {:>5.1}%{}\n",
            cipher.display_name(),
            bar(probability),
            probability * 100.0,
            marker
        ));
    }
    out.push('\n');

    if let Some(basic) = &report.basic {
        out.push_str(&format!("{BOLD}STATISTICS{RESET}\n"));
        out.push_str(&format!(
            "  IC: {:.4}  χ²: {:.2}  Englishness: {:.0}%  Unique letters: {}\n\n",
            basic.index_of_coincidence,
            basic.chi_square,
            basic.englishness_percent,
            basic.unique_letters
        ));
    }

    // Recovered parameters
    let stats = &report.detector_stats;
    let mut params = Vec::new();
    if let Some(shift) = stats.caesar_shift {
        params.push(format!("Caesar shift: {}", shift));
    }
    if let Some(key) = stats.affine_key {
        params.push(format!("Affine key: {}", key));
    }
    if let Some(length) = stats.vigenere_key_length {
        match &stats.vigenere_key {
            Some(key) => params.push(format!("Vigenère key length: {} (key {})", length, key)),
            None => params.push(format!("Vigenère key length: {}", length)),
        }
    }
    if let Some(variant) = stats.adfgx_variant {
        params.push(format!("ADFGX variant: {}", variant));
    }
    if !params.is_empty() {
        out.push_str(&format!("{BOLD}PARAMETERS{RESET}\n"));
        for param in params {
            out.push_str(&format!("  {}\n", param));
        }
        out.push('\n');
    }

    if let Some(preview) = winner_preview(report) {
        out.push_str(&format!("{BOLD}DECRYPTION PREVIEW{RESET}\n"));
        out.push_str(&format!("  {}\n\n", snippet(preview)));
    }

    if !report.degraded.is_empty() {
        let names: Vec<&str> = report.degraded.iter().map(CipherType::display_name).collect();
        out.push_str(&format!(
            "\x1b[33mDegraded detectors:{RESET} {} {DIM}(fallback evidence used){RESET}\n\n",
            names.join(", ")
        ));
    }

    if with_explanation {
        render_explanation(report, &mut out);
    }

    Ok(out)
}

fn render_explanation(report: &AnalysisReport, out: &mut String) {
    let explanation = explain(report);

    if !explanation.statistics.is_empty() {
        out.push_str(&format!("{BOLD}STATISTICAL EVIDENCE{RESET}\n"));
        for note in &explanation.statistics {
            let color = confidence_color(note.confidence);
            out.push_str(&format!(
                "  {:<21} {:>8}  {color}[{:?}]{RESET} {}\n",
                note.metric, note.value, note.confidence, note.analysis
            ));
        }
        out.push('\n');
    }

    if !explanation.reasons.is_empty() {
        out.push_str(&format!(
            "{BOLD}WHY {}{RESET}\n",
            report.winner.cipher.display_name().to_uppercase()
        ));
        for reason in &explanation.reasons {
            let color = strength_color(reason.strength);
            out.push_str(&format!(
                "  {color}●{RESET} {}: {} {DIM}({}){RESET}\n",
                reason.evidence,
                reason.description,
                reason.strength.label()
            ));
        }
        out.push('\n');
    }

    if !explanation.exclusions.is_empty() {
        out.push_str(&format!("{BOLD}RULED OUT{RESET}\n"));
        for exclusion in &explanation.exclusions {
            out.push_str(&format!(
                "  {DIM}{:<14} {:>3}%{RESET}  {}\n",
                exclusion.cipher.display_name(),
                exclusion.probability,
                exclusion.reason
            ));
        }
        out.push('\n');
    }
}
