//! Transposition detector
//!
//! Transposition keeps every letter and only moves it, so the letter
//! frequencies stay English while the order does not. A rearranged English
//! text still leaks some common digraphs, which is what separates it from a
//! random substitution with English-like IC.

use super::base::{AnalysisContext, Detector, DetectorDetails, DetectorResult};
use crate::config::TranspositionCalibration;
use crate::error::DetectorError;
use crate::models::CipherType;
use crate::stats::clamp01;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranspositionFeatures {
    /// Closeness of letter frequencies to English, 0..1
    pub chi_term: f64,
    pub englishness: f64,
    pub ic_term: f64,
    /// Englishness was too low for the full score
    pub weak_fallback: bool,
}

/// 1 inside `[low, high]`, decaying linearly to 0 over `decay` outside
pub(crate) fn band_term(value: f64, low: f64, high: f64, decay: f64) -> f64 {
    if (low..=high).contains(&value) {
        return 1.0;
    }
    let distance = (value - low).abs().min((value - high).abs());
    clamp01(1.0 - distance / decay)
}

pub struct TranspositionDetector {
    calibration: TranspositionCalibration,
}

impl TranspositionDetector {
    pub fn new(calibration: TranspositionCalibration) -> Self {
        Self { calibration }
    }
}

impl Default for TranspositionDetector {
    fn default() -> Self {
        Self::new(TranspositionCalibration::default())
    }
}

impl Detector for TranspositionDetector {
    fn name(&self) -> &'static str {
        "transposition"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Transposition
    }

    fn description(&self) -> &'static str {
        "English letter frequencies and IC with residual English digraphs"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let cal = &self.calibration;
        let chi_term = clamp01((cal.chi_threshold - ctx.chi_square) / cal.chi_threshold);
        let englishness = ctx.englishness.score();
        let ic_term = band_term(ctx.ic, cal.ic_low, cal.ic_high, cal.ic_decay);

        let weak_fallback = englishness < cal.englishness_floor;
        let evidence = if weak_fallback {
            cal.fallback_weight * chi_term
        } else {
            let mut score = cal.englishness_weight * englishness
                + cal.chi_weight * chi_term
                + cal.ic_weight * ic_term;
            if englishness >= cal.strong_englishness {
                score *= cal.strong_bonus;
            }
            if chi_term == 0.0 {
                score *= cal.no_fit_penalty;
            }
            score * ctx.coverage
        };

        debug!(
            "transposition: eng {:.2} chi {:.2} ic {:.2} evidence {:.3}",
            englishness, chi_term, ic_term, evidence
        );
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Transposition(TranspositionFeatures {
                chi_term,
                englishness,
                ic_term,
                weak_fallback,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Calibration;
    use crate::detectors::test_support::{columnar_encrypt, substitution_encrypt, GETTYSBURG};
    use crate::text::NormalizedText;

    fn run(cipher: &[u8]) -> DetectorResult {
        let raw = String::from_utf8(cipher.to_vec()).unwrap();
        let text = NormalizedText::new(&raw).unwrap();
        let ctx = AnalysisContext::new(&text, &Calibration::default());
        TranspositionDetector::default().detect(&ctx).unwrap()
    }

    #[test]
    fn test_band_term() {
        assert_eq!(band_term(0.065, 0.060, 0.072, 0.01), 1.0);
        assert!((band_term(0.055, 0.060, 0.072, 0.01) - 0.5).abs() < 1e-9);
        assert_eq!(band_term(0.030, 0.060, 0.072, 0.01), 0.0);
        assert!((band_term(0.077, 0.060, 0.072, 0.01) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_columnar_scores_high() {
        let cipher = columnar_encrypt(GETTYSBURG.as_bytes(), b"ZEBRAS");
        let result = run(&cipher);
        assert!(result.evidence > 0.6);
    }

    #[test]
    fn test_substitution_scores_low() {
        let transposed = run(&columnar_encrypt(GETTYSBURG.as_bytes(), b"ZEBRAS"));
        let substituted = run(&substitution_encrypt(
            GETTYSBURG.as_bytes(),
            b"XYLKWBFZTNJRQAHVGMUOPDICSE",
        ));
        assert!(substituted.evidence < transposed.evidence * 0.3);
    }
}
