//! Affine cipher detector
//!
//! Searches all 12 × 26 keys (a coprime to 26). Candidate ranking is the
//! same readability-weighted chi-square as the Caesar detector. Keys with
//! a = 1 are plain shifts, so they are discounted in favour of Caesar.

use super::base::{preview, AnalysisContext, Detector, DetectorDetails, DetectorResult};
use crate::config::AffineCalibration;
use crate::error::DetectorError;
use crate::models::{AffineKey, CipherType};
use crate::stats::{clamp01, Englishness, FrequencyTable};
use serde::Serialize;
use tracing::debug;

/// Values of `a` with an inverse mod 26
pub const AFFINE_MULTIPLIERS: [u8; 12] = [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffineFit {
    pub key: AffineKey,
    pub chi_square: f64,
    pub rank_score: f64,
    pub preview: String,
}

/// Multiplicative inverse of `a` mod 26
pub fn mod_inverse(a: u8) -> Option<u8> {
    (1..26u8).find(|&x| (a as u32 * x as u32) % 26 == 1)
}

/// p = a⁻¹ (c - b) mod 26
pub fn affine_decrypt(text: &[u8], a_inv: u8, b: u8) -> Vec<u8> {
    let a_inv = a_inv as u32;
    let b = (b % 26) as u32;
    text.iter()
        .map(|&c| {
            let c = (c - b'A') as u32;
            b'A' + ((a_inv * (c + 26 - b)) % 26) as u8
        })
        .collect()
}

pub struct AffineDetector {
    calibration: AffineCalibration,
}

impl AffineDetector {
    pub fn new(calibration: AffineCalibration) -> Self {
        Self { calibration }
    }

    fn best_key(&self, ctx: &AnalysisContext<'_>) -> Result<AffineFit, DetectorError> {
        let text = ctx.bytes();
        let mut best: Option<(f64, f64, AffineKey, Vec<u8>)> = None;
        for a in AFFINE_MULTIPLIERS {
            let a_inv = mod_inverse(a).ok_or_else(|| DetectorError::Internal {
                detector: self.name(),
                reason: format!("{} has no inverse mod 26", a),
            })?;
            for b in 0..26u8 {
                let plain = affine_decrypt(text, a_inv, b);
                let chi = FrequencyTable::from_bytes(&plain).chi_square();
                let score = chi / (1.0 + Englishness::measure(&plain).raw());
                if best.as_ref().map_or(true, |(s, ..)| score < *s) {
                    best = Some((score, chi, AffineKey { a, b }, plain));
                }
            }
        }
        let (rank_score, chi_square, key, plain) = best.ok_or_else(|| DetectorError::Internal {
            detector: self.name(),
            reason: "no key evaluated".to_string(),
        })?;
        Ok(AffineFit {
            key,
            chi_square,
            rank_score,
            preview: preview(&plain),
        })
    }
}

impl Default for AffineDetector {
    fn default() -> Self {
        Self::new(AffineCalibration::default())
    }
}

impl Detector for AffineDetector {
    fn name(&self) -> &'static str {
        "affine"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Affine
    }

    fn description(&self) -> &'static str {
        "Best of 312 (a, b) keys by chi-square against English, weighted by readability"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let cal = &self.calibration;
        let fit = self.best_key(ctx)?;

        let mut evidence = clamp01((cal.chi_threshold - fit.chi_square) / cal.chi_threshold);
        if (cal.ic_band_low..=cal.ic_band_high).contains(&ctx.ic) {
            evidence *= cal.ic_bonus;
        }
        if fit.key.a == 1 {
            evidence *= cal.shift_key_penalty;
            if fit.key.b == 0 {
                evidence *= cal.identity_penalty;
            }
        }
        evidence *= ctx.coverage;

        debug!(
            "affine: {} chi2 {:.1} evidence {:.3}",
            fit.key, fit.chi_square, evidence
        );
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Affine(fit),
        )
    }
}
