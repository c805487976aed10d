//! Base detector trait and types
//!
//! This module defines the core abstractions for cipher detection:
//! - `Detector` trait that all cipher detectors implement
//! - `AnalysisContext`, the statistics computed once and shared by all detectors
//! - `DetectorResult` for a detector's evidence and `DetectorOutcome` for
//!   what the engine recorded about running it

use super::adfgx::AdfgxMatch;
use super::affine::AffineFit;
use super::caesar::CaesarFit;
use super::playfair::PlayfairFeatures;
use super::substitution::SubstitutionTerms;
use super::transposition::TranspositionFeatures;
use super::vigenere::VigenereAnalysis;
use crate::config::Calibration;
use crate::error::DetectorError;
use crate::models::CipherType;
use crate::periodicity::PeriodicityProfile;
use crate::stats::{alphabet_coverage, Englishness, FrequencyTable};
use crate::text::NormalizedText;
use serde::Serialize;

/// Letters kept in decryption previews
pub const PREVIEW_LEN: usize = 300;

/// Whole-text statistics shared by every detector.
///
/// Built once per analysis; detectors only read it.
#[derive(Debug, Clone)]
pub struct AnalysisContext<'a> {
    pub text: &'a NormalizedText,
    pub frequencies: FrequencyTable,
    pub chi_square: f64,
    pub ic: f64,
    pub englishness: Englishness,
    /// Alphabet coverage relative to English of the same length
    pub coverage: f64,
    pub periodicity: PeriodicityProfile,
    /// Upper bound for a single detector's evidence
    pub max_evidence: f64,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(text: &'a NormalizedText, calibration: &Calibration) -> Self {
        let bytes = text.as_bytes();
        let frequencies = FrequencyTable::from_bytes(bytes);
        let coverage = alphabet_coverage(frequencies.distinct(), text.len(), calibration.coverage_ratio);
        Self {
            text,
            chi_square: frequencies.chi_square(),
            ic: frequencies.index_of_coincidence(),
            englishness: Englishness::measure(bytes),
            coverage,
            periodicity: PeriodicityProfile::analyze(bytes, &calibration.periodicity),
            frequencies,
            max_evidence: calibration.max_evidence,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Detector-specific byproducts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorDetails {
    Substitution(SubstitutionTerms),
    Caesar(CaesarFit),
    Affine(AffineFit),
    Vigenere(Box<VigenereAnalysis>),
    Playfair(PlayfairFeatures),
    Transposition(TranspositionFeatures),
    Adfgx(AdfgxMatch),
    /// The detector ran but had nothing to measure
    Skipped { reason: String },
    /// The detector failed; evidence is the fallback value
    Failed { reason: String },
}

/// Evidence produced by one detector call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorResult {
    pub cipher: CipherType,
    /// In [0, max_evidence]
    pub evidence: f64,
    pub details: DetectorDetails,
}

impl DetectorResult {
    /// Build a result, rejecting non-finite evidence and clamping the rest
    /// to [0, max_evidence]
    pub fn checked(
        detector: &'static str,
        cipher: CipherType,
        evidence: f64,
        max_evidence: f64,
        details: DetectorDetails,
    ) -> Result<Self, DetectorError> {
        if !evidence.is_finite() {
            return Err(DetectorError::NonFinite {
                detector,
                what: "evidence",
            });
        }
        Ok(Self {
            cipher,
            evidence: evidence.clamp(0.0, max_evidence),
            details,
        })
    }

    /// Zero evidence with a reason
    pub fn skipped(cipher: CipherType, reason: impl Into<String>) -> Self {
        Self {
            cipher,
            evidence: 0.0,
            details: DetectorDetails::Skipped {
                reason: reason.into(),
            },
        }
    }
}

/// Trait for all cipher detectors
///
/// A detector looks at the shared [`AnalysisContext`] and returns how
/// strongly the text resembles its cipher family. Detectors never see each
/// other's results.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct EvenLengthDetector;
///
/// impl Detector for EvenLengthDetector {
///     fn name(&self) -> &'static str {
///         "even-length"
///     }
///
///     fn cipher(&self) -> CipherType {
///         CipherType::Playfair
///     }
///
///     fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
///         let evidence = if ctx.len() % 2 == 0 { 0.5 } else { 0.0 };
///         DetectorResult::checked(self.name(), self.cipher(), evidence, ctx.max_evidence,
///             DetectorDetails::Skipped { reason: String::new() })
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Cipher family this detector scores
    fn cipher(&self) -> CipherType;

    /// Human-readable description of what this detector measures
    fn description(&self) -> &'static str;

    /// Score the text
    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError>;
}

/// What the engine recorded about one detector run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorOutcome {
    pub detector: String,
    pub cipher: CipherType,
    pub evidence: f64,
    pub details: DetectorDetails,
    /// Execution time in microseconds
    pub duration_us: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectorOutcome {
    /// Create a successful outcome
    pub fn success(detector: &str, result: DetectorResult, duration_us: u64) -> Self {
        Self {
            detector: detector.to_string(),
            cipher: result.cipher,
            evidence: result.evidence,
            details: result.details,
            duration_us,
            success: true,
            error: None,
        }
    }

    /// Create a failed outcome carrying the fallback evidence
    pub fn failure(
        detector: &str,
        cipher: CipherType,
        error: String,
        fallback_evidence: f64,
        duration_us: u64,
    ) -> Self {
        Self {
            detector: detector.to_string(),
            cipher,
            evidence: fallback_evidence,
            details: DetectorDetails::Failed {
                reason: error.clone(),
            },
            duration_us,
            success: false,
            error: Some(error),
        }
    }
}

/// Summary statistics from running all detectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSummary {
    pub detectors_run: usize,
    pub detectors_succeeded: usize,
    pub detectors_failed: usize,
    /// Total execution time in microseconds
    pub total_duration_us: u64,
}

impl DetectionSummary {
    pub fn add_outcome(&mut self, outcome: &DetectorOutcome) {
        self.detectors_run += 1;
        self.total_duration_us += outcome.duration_us;
        if outcome.success {
            self.detectors_succeeded += 1;
        } else {
            self.detectors_failed += 1;
        }
    }
}

/// First `PREVIEW_LEN` letters of a decryption
pub(crate) fn preview(plain: &[u8]) -> String {
    let end = plain.len().min(PREVIEW_LEN);
    String::from_utf8_lossy(&plain[..end]).into_owned()
}
