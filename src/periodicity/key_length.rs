//! Key length candidate ranking
//!
//! Each length k gets two components:
//!
//! ```text
//! ac  = max(0, ac[k] - baseline) * (1 + w * ln k)
//! gcd = hist[k] * small_divisor(k) * reward(k)
//! ```
//!
//! Both are normalized by their maximum over all k and averaged. Lengths
//! that divide a stronger candidate are halved (a period-k cipher is also
//! periodic at 2k, 3k, ..., but the reverse must not win), and lengths
//! with a clear autocorrelation spike get a bonus.

use super::{lag_value, GcdHistogram};
use crate::config::PeriodicityCalibration;
use serde::Serialize;
use tracing::debug;

/// A ranked key length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyLengthCandidate {
    pub length: usize,
    pub score: f64,
    /// Normalized autocorrelation component
    pub ac_component: f64,
    /// Normalized GCD histogram component
    pub gcd_component: f64,
}

pub struct KeyLengthRanker<'a> {
    calibration: &'a PeriodicityCalibration,
}

impl<'a> KeyLengthRanker<'a> {
    pub fn new(calibration: &'a PeriodicityCalibration) -> Self {
        Self { calibration }
    }

    fn ac_component(&self, ac: &[f64], k: usize) -> f64 {
        let c = self.calibration;
        let v = lag_value(ac, k);
        (v - c.ac_baseline).max(0.0) * (1.0 + c.ac_log_weight * (k as f64).ln())
    }

    fn gcd_component(&self, hist: &GcdHistogram, k: usize) -> f64 {
        let c = self.calibration;
        let kf = k as f64;
        let small_divisor = if kf < c.small_divisor_pivot {
            (kf / c.small_divisor_pivot).powi(c.small_divisor_exponent)
        } else {
            1.0
        };
        hist.get(k) * small_divisor * c.length_reward(k)
    }

    /// Top candidates with a positive score, best first (ties: shorter first)
    pub fn rank(&self, ac: &[f64], hist: &GcdHistogram) -> Vec<KeyLengthCandidate> {
        let c = self.calibration;
        let lengths: Vec<usize> = (c.min_key_length..=c.max_key_length).collect();

        let acs: Vec<f64> = lengths.iter().map(|&k| self.ac_component(ac, k)).collect();
        let gcs: Vec<f64> = lengths.iter().map(|&k| self.gcd_component(hist, k)).collect();
        let max_ac = nonzero_max(&acs);
        let max_gcd = nonzero_max(&gcs);

        let ac_norm: Vec<f64> = acs.iter().map(|v| v / max_ac).collect();
        let gcd_norm: Vec<f64> = gcs.iter().map(|v| v / max_gcd).collect();
        let base: Vec<f64> = ac_norm
            .iter()
            .zip(&gcd_norm)
            .map(|(a, g)| 0.5 * a + 0.5 * g)
            .collect();

        let mut candidates: Vec<KeyLengthCandidate> = lengths
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let mut score = base[i];
                let beaten_by_multiple = (2 * k..=c.max_key_length)
                    .step_by(k)
                    .any(|m| base[m - c.min_key_length] > base[i]);
                if beaten_by_multiple {
                    score *= c.divisor_penalty;
                }
                if lag_value(ac, k) > c.strong_ac_threshold {
                    score *= c.strong_ac_bonus;
                }
                KeyLengthCandidate {
                    length: k,
                    score,
                    ac_component: ac_norm[i],
                    gcd_component: gcd_norm[i],
                }
            })
            .filter(|cand| cand.score > 0.0)
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.length.cmp(&b.length)));
        candidates.truncate(c.top_candidates);

        debug!(
            "Key length candidates: {:?}",
            candidates
                .iter()
                .map(|cand| (cand.length, cand.score))
                .collect::<Vec<_>>()
        );
        candidates
    }
}

fn nonzero_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}
