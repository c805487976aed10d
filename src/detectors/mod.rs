//! Cipher detectors
//!
//! One detector per cipher family, all implementing [`Detector`] and run
//! independently by the [`DetectorEngine`]:
//!
//! - [`SubstitutionDetector`] unclassified monoalphabetic substitution
//! - [`CaesarDetector`] / [`AffineDetector`] keyed monoalphabetic search
//! - [`VigenereDetector`] key length and column analysis
//! - [`PlayfairDetector`] digraph structure
//! - [`TranspositionDetector`] English frequencies in scrambled order
//! - [`AdfgxDetector`] restricted alphabet

mod adfgx;
mod affine;
mod base;
mod caesar;
mod engine;
mod playfair;
mod substitution;
mod transposition;
mod vigenere;

#[cfg(test)]
pub(crate) mod test_support;

pub use adfgx::{classify_alphabet, AdfgxDetector, AdfgxMatch, AdfgxVariant};
pub use affine::{affine_decrypt, mod_inverse, AffineDetector, AffineFit, AFFINE_MULTIPLIERS};
pub use base::{
    AnalysisContext, DetectionSummary, Detector, DetectorDetails, DetectorOutcome, DetectorResult,
    PREVIEW_LEN,
};
pub use caesar::{best_caesar_shift_chi2, caesar_decrypt, CaesarDetector, CaesarFit};
pub use engine::{DetectorEngine, DEFAULT_FALLBACK_EVIDENCE};
pub use playfair::{PlayfairDetector, PlayfairFeatures};
pub use substitution::{SubstitutionDetector, SubstitutionTerms};
pub use transposition::{TranspositionDetector, TranspositionFeatures};
pub use vigenere::{
    split_columns, vigenere_decrypt, CandidateRecord, VigenereAnalysis, VigenereDetector,
};

use crate::config::{AnalysisOptions, Calibration};
use std::sync::Arc;

/// Detectors enabled by `options`, in canonical cipher order
pub fn default_detectors(
    options: &AnalysisOptions,
    calibration: &Calibration,
) -> Vec<Arc<dyn Detector>> {
    let mut detectors: Vec<Arc<dyn Detector>> = Vec::new();
    if options.basic {
        detectors.push(Arc::new(SubstitutionDetector::new(
            calibration.substitution.clone(),
        )));
    }
    if options.caesar_affine {
        detectors.push(Arc::new(CaesarDetector::new(calibration.caesar.clone())));
        detectors.push(Arc::new(AffineDetector::new(calibration.affine.clone())));
    }
    if options.vig_auto_kasiski || options.vig_columns {
        detectors.push(Arc::new(VigenereDetector::new(
            calibration.vigenere.clone(),
            calibration.periodicity.clone(),
            options.vig_auto_kasiski,
            options.vig_columns,
        )));
    }
    if options.playfair {
        detectors.push(Arc::new(PlayfairDetector::new(calibration.playfair.clone())));
    }
    if options.transposition {
        detectors.push(Arc::new(TranspositionDetector::new(
            calibration.transposition.clone(),
        )));
    }
    if options.adfgx {
        detectors.push(Arc::new(AdfgxDetector::new(calibration.adfgx.clone())));
    }
    detectors
}

/// Every detector with default settings, for listing
pub fn all_detectors() -> Vec<Arc<dyn Detector>> {
    default_detectors(&AnalysisOptions::default(), &Calibration::default())
}
