//! Kasiski examination: distances between repeated n-grams

use crate::config::PeriodicityCalibration;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

/// Distance between two consecutive occurrences of a repeated n-gram
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KasiskiDistance {
    pub distance: usize,
    pub ngram_len: usize,
    pub weight: f64,
}

/// Collect distances for n-gram lengths `kasiski_min_len..=kasiski_max()`.
///
/// Distances are listed length by length, in positional order within a
/// length, and truncated at `max_distances`.
pub fn kasiski_distances(
    text: &[u8],
    calibration: &PeriodicityCalibration,
) -> Vec<KasiskiDistance> {
    let mut distances = Vec::new();
    for len in calibration.kasiski_min_len..=calibration.kasiski_max() {
        if text.len() < len {
            break;
        }
        let weight = calibration.repeat_weight(len);
        let mut last_seen: FxHashMap<&[u8], usize> = FxHashMap::default();
        for (i, gram) in text.windows(len).enumerate() {
            if let Some(prev) = last_seen.insert(gram, i) {
                distances.push(KasiskiDistance {
                    distance: i - prev,
                    ngram_len: len,
                    weight,
                });
            }
        }
    }

    if distances.len() > calibration.max_distances {
        debug!(
            "Kasiski: truncating {} distances to {}",
            distances.len(),
            calibration.max_distances
        );
        distances.truncate(calibration.max_distances);
    }
    distances
}
