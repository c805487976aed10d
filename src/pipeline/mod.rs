//! Analysis pipeline
//!
//! Orchestrates one classification call:
//! 1. Validate options and calibration
//! 2. Normalize the input to its A-Z letters
//! 3. Compute the shared statistics and periodicity profile
//! 4. Run the enabled detectors
//! 5. Aggregate evidence into probabilities and a winner
//! 6. Collect the byproduct parameters and chart series

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{AnalysisOptions, Calibration};
use crate::detectors::{
    default_detectors, AnalysisContext, DetectorDetails, DetectorEngine, DetectorOutcome,
};
use crate::error::AnalysisError;
use crate::models::{AnalysisReport, BasicStats, CipherType, DetectorStats, VisualData};
use crate::scoring::{EvidenceAggregator, EvidenceMap};
use crate::text::{display_text, NormalizedText};

/// Inputs at least this long are checked for a low letter ratio
const LETTER_RATIO_MIN_CHARS: usize = 20;
const LETTER_RATIO_WARNING: f64 = 0.5;

/// Classifier with fixed options and calibration.
///
/// Holds no per-call state; `analyze` can be called repeatedly.
pub struct Analyzer {
    options: AnalysisOptions,
    calibration: Calibration,
    /// Detector worker threads (0 = auto)
    workers: usize,
}

impl Analyzer {
    pub fn new(options: AnalysisOptions, calibration: Calibration) -> Self {
        Self {
            options,
            calibration,
            workers: 0,
        }
    }

    /// Set the number of detector worker threads (1 = sequential).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Classify `raw`.
    ///
    /// # Errors
    /// `EmptyInput` when `raw` has no A-Z letters, `InvalidCalibration` for
    /// out-of-range options or constants, `NoDetectors` when every toggle is
    /// off.
    pub fn analyze(&self, raw: &str) -> Result<AnalysisReport, AnalysisError> {
        let start = Instant::now();
        self.options.validate()?;
        self.calibration.validate()?;

        let text = NormalizedText::new(raw)?;
        let total_chars = text.len() + text.stripped();
        if total_chars >= LETTER_RATIO_MIN_CHARS && text.letter_ratio() < LETTER_RATIO_WARNING {
            warn!(
                "Only {:.0}% of the input are letters; results may be unreliable",
                text.letter_ratio() * 100.0
            );
        }
        info!(
            "Analyzing {} letters ({} characters stripped)",
            text.len(),
            text.stripped()
        );

        let detectors = default_detectors(&self.options, &self.calibration);
        if detectors.is_empty() {
            return Err(AnalysisError::NoDetectors);
        }

        let ctx = AnalysisContext::new(&text, &self.calibration);
        debug!(
            "Context: IC {:.4}, chi2 {:.1}, {} key length candidates",
            ctx.ic,
            ctx.chi_square,
            ctx.periodicity.candidates.len()
        );

        let mut engine = DetectorEngine::new(self.workers)
            .with_fallback_evidence(self.calibration.fallback_evidence);
        engine.register_all(detectors);
        let (outcomes, summary) = engine.run(&ctx)?;

        let raw_evidence: EvidenceMap = outcomes.iter().map(|o| (o.cipher, o.evidence)).collect();
        let aggregator = EvidenceAggregator::from_calibration(
            &self.calibration,
            self.options.temperature,
            self.options.length_bias,
        );
        let aggregate = aggregator
            .aggregate(&raw_evidence, text.len())
            .ok_or(AnalysisError::NoDetectors)?;

        let degraded: Vec<CipherType> = outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| o.cipher)
            .collect();

        let basic = self.options.basic.then(|| BasicStats {
            index_of_coincidence: ctx.ic,
            chi_square: ctx.chi_square,
            englishness_percent: ctx.englishness.percent(),
            unique_letters: ctx.frequencies.distinct(),
        });

        let visual = VisualData {
            frequencies: ctx.frequencies.counts().to_vec(),
            autocorrelation: ctx.periodicity.autocorrelation.clone(),
            gcd_histogram: ctx.periodicity.gcd_histogram.clone(),
        };

        info!(
            "Winner: {} ({:.1}%), {} degraded, detectors took {}us, total {:?}",
            aggregate.winner.cipher,
            aggregate.winner.probability * 100.0,
            summary.detectors_failed,
            summary.total_duration_us,
            start.elapsed()
        );

        Ok(AnalysisReport {
            display_text: display_text(raw, &text, self.options.strip_non_letters),
            length: text.len(),
            stripped: text.stripped(),
            text: text.as_str().to_string(),
            basic,
            detector_stats: detector_stats(&outcomes),
            visual,
            raw_evidence,
            evidence: aggregate.evidence,
            probabilities: aggregate.probabilities,
            winner: aggregate.winner,
            degraded,
            detectors: outcomes,
        })
    }
}

/// Pull recovered parameters out of the detector details
fn detector_stats(outcomes: &[DetectorOutcome]) -> DetectorStats {
    let mut stats = DetectorStats::default();
    for outcome in outcomes {
        match &outcome.details {
            DetectorDetails::Caesar(fit) => stats.caesar_shift = Some(fit.shift),
            DetectorDetails::Affine(fit) => stats.affine_key = Some(fit.key),
            DetectorDetails::Vigenere(analysis) if analysis.key_length > 0 => {
                stats.vigenere_key_length = Some(analysis.key_length);
                stats.vigenere_key = analysis.key.clone();
            }
            DetectorDetails::Adfgx(found) => stats.adfgx_variant = found.variant,
            _ => {}
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{caesar_encrypt, vigenere_encrypt, GETTYSBURG};
    use crate::detectors::AdfgxVariant;

    fn encrypted(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalysisOptions::default(), Calibration::default()).with_workers(1)
    }

    #[test]
    fn test_hello_world_caesar() {
        let report = analyzer().analyze("KHOOR ZRUOG").unwrap();
        assert_eq!(report.winner.cipher, CipherType::Caesar);
        assert_eq!(report.detector_stats.caesar_shift, Some(3));
        assert_eq!(report.length, 10);
        assert_eq!(report.stripped, 1);
    }

    #[test]
    fn test_empty_input() {
        let err = analyzer().analyze("1234 !!").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_all_disabled() {
        let options = AnalysisOptions {
            basic: false,
            caesar_affine: false,
            vig_auto_kasiski: false,
            vig_columns: false,
            playfair: false,
            transposition: false,
            adfgx: false,
            ..AnalysisOptions::default()
        };
        let err = Analyzer::new(options, Calibration::default())
            .analyze("HELLO")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoDetectors));
    }

    #[test]
    fn test_invalid_temperature() {
        let options = AnalysisOptions {
            temperature: 0.0,
            ..AnalysisOptions::default()
        };
        let err = Analyzer::new(options, Calibration::default())
            .analyze("HELLO")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCalibration(_)));
    }

    #[test]
    fn test_evidence_keys_match_enabled_detectors() {
        let options = AnalysisOptions {
            playfair: false,
            adfgx: false,
            ..AnalysisOptions::default()
        };
        let report = Analyzer::new(options, Calibration::default())
            .analyze(GETTYSBURG)
            .unwrap();
        let keys: Vec<CipherType> = report.evidence.ciphers().collect();
        assert_eq!(
            keys,
            vec![
                CipherType::Substitution,
                CipherType::Caesar,
                CipherType::Affine,
                CipherType::Vigenere,
                CipherType::Transposition,
            ]
        );
        assert_eq!(report.probabilities.len(), 5);
        assert!((report.probabilities.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_basic_stats_follow_toggle() {
        let with = analyzer().analyze(GETTYSBURG).unwrap();
        let basic = with.basic.unwrap();
        assert!(basic.index_of_coincidence > 0.06);
        assert!(basic.unique_letters > 20);

        let options = AnalysisOptions {
            basic: false,
            ..AnalysisOptions::default()
        };
        let without = Analyzer::new(options, Calibration::default())
            .analyze(GETTYSBURG)
            .unwrap();
        assert!(without.basic.is_none());
        assert!(without.evidence.get(CipherType::Substitution).is_none());
    }

    #[test]
    fn test_display_text_toggle() {
        let options = AnalysisOptions {
            strip_non_letters: false,
            ..AnalysisOptions::default()
        };
        let report = Analyzer::new(options, Calibration::default())
            .analyze("Khoor, zruog!")
            .unwrap();
        assert_eq!(report.display_text, "KHOOR, ZRUOG!");
        assert_eq!(report.text, "KHOORZRUOG");
    }

    #[test]
    fn test_vigenere_parameters_reported() {
        let cipher = encrypted(vigenere_encrypt(GETTYSBURG.as_bytes(), b"LEMON"));
        let report = analyzer().analyze(&cipher).unwrap();
        assert_eq!(report.winner.cipher, CipherType::Vigenere);
        assert_eq!(report.detector_stats.vigenere_key_length, Some(5));
        assert_eq!(report.detector_stats.vigenere_key.as_deref(), Some("LEMON"));
    }

    #[test]
    fn test_adfgx_variant_reported() {
        let report = analyzer().analyze("ADFGXXGFDAADFGXXGFDA").unwrap();
        assert_eq!(report.detector_stats.adfgx_variant, Some(AdfgxVariant::Adfgx));
    }

    #[test]
    fn test_visual_series() {
        let report = analyzer()
            .analyze(&encrypted(caesar_encrypt(GETTYSBURG.as_bytes(), 7)))
            .unwrap();
        assert_eq!(report.visual.frequencies.len(), 26);
        let total: u32 = report.visual.frequencies.iter().sum();
        assert_eq!(total as usize, report.length);
        assert_eq!(report.visual.autocorrelation.len(), 40);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cipher = encrypted(caesar_encrypt(GETTYSBURG.as_bytes(), 11));
        let sequential = analyzer().analyze(&cipher).unwrap();
        let parallel = Analyzer::new(AnalysisOptions::default(), Calibration::default())
            .with_workers(4)
            .analyze(&cipher)
            .unwrap();
        assert_eq!(sequential.probabilities, parallel.probabilities);
        assert_eq!(sequential.winner, parallel.winner);
    }
}
