//! Periodicity analysis
//!
//! Polyalphabetic ciphers repeat their key, and the repetition leaks into
//! the ciphertext in two ways this module measures:
//!
//! - **Autocorrelation**: the text shifted by a multiple of the key length
//!   lines up with itself more often than at other lags
//! - **Kasiski**: repeated n-grams sit at distances that are multiples of
//!   the key length; the GCDs of those distances pile up on it
//!
//! [`KeyLengthRanker`] fuses both into a short list of candidate lengths.

mod autocorrelation;
mod gcd;
mod kasiski;
mod key_length;

pub use autocorrelation::{autocorrelation, lag_value};
pub use gcd::{gcd, GcdHistogram};
pub use kasiski::{kasiski_distances, KasiskiDistance};
pub use key_length::{KeyLengthCandidate, KeyLengthRanker};

use crate::config::PeriodicityCalibration;
use serde::Serialize;

/// Everything the periodicity search learned about one text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodicityProfile {
    /// Index 0 is lag 1
    pub autocorrelation: Vec<f64>,
    #[serde(skip)]
    pub distances: Vec<KasiskiDistance>,
    pub gcd_histogram: GcdHistogram,
    pub candidates: Vec<KeyLengthCandidate>,
}

impl PeriodicityProfile {
    pub fn analyze(text: &[u8], calibration: &PeriodicityCalibration) -> Self {
        let autocorrelation = autocorrelation(text, calibration.max_lag);
        let distances = kasiski_distances(text, calibration);
        let gcd_histogram =
            GcdHistogram::from_distances(&distances, calibration.gcd_min, calibration.gcd_max);
        let candidates = KeyLengthRanker::new(calibration).rank(&autocorrelation, &gcd_histogram);
        Self {
            autocorrelation,
            distances,
            gcd_histogram,
            candidates,
        }
    }

    /// Autocorrelation at lag `k` (0 when not measured)
    pub fn ac(&self, k: usize) -> f64 {
        lag_value(&self.autocorrelation, k)
    }

    /// Lag with the highest autocorrelation
    pub fn strongest_lag(&self) -> Option<(usize, f64)> {
        self.autocorrelation
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((i + 1, v)),
            })
    }
}
