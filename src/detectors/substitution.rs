//! Unclassified monoalphabetic substitution
//!
//! A general substitution keeps the English IC but scrambles which letters
//! are frequent, so the chi-square against English is large.

use super::base::{AnalysisContext, Detector, DetectorDetails, DetectorResult};
use super::transposition::band_term;
use crate::config::SubstitutionCalibration;
use crate::error::DetectorError;
use crate::models::CipherType;
use crate::stats::clamp01;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionTerms {
    /// 1 when the IC sits on the English plateau
    pub ic_term: f64,
    /// How far letter frequencies are from English, 0..1
    pub divergence: f64,
}

pub struct SubstitutionDetector {
    calibration: SubstitutionCalibration,
}

impl SubstitutionDetector {
    pub fn new(calibration: SubstitutionCalibration) -> Self {
        Self { calibration }
    }
}

impl Default for SubstitutionDetector {
    fn default() -> Self {
        Self::new(SubstitutionCalibration::default())
    }
}

impl Detector for SubstitutionDetector {
    fn name(&self) -> &'static str {
        "substitution"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Substitution
    }

    fn description(&self) -> &'static str {
        "English-like IC with letter frequencies far from English"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let cal = &self.calibration;
        let ic_term = band_term(ctx.ic, cal.ic_low, cal.ic_high, cal.ic_decay);
        let divergence = clamp01((ctx.chi_square - cal.chi_offset) / cal.chi_range);
        let evidence = cal.weight * ic_term * divergence * ctx.coverage;

        debug!(
            "substitution: ic {:.2} divergence {:.2} evidence {:.3}",
            ic_term, divergence, evidence
        );
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Substitution(SubstitutionTerms {
                ic_term,
                divergence,
            }),
        )
    }
}
