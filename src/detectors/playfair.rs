//! Playfair structural suspicion
//!
//! Playfair leaves fingerprints in the ciphertext rather than in letter
//! frequencies: even length, no J (merged with I in the key square), no
//! doubled letter inside an enciphered digraph and, from the padding, a
//! noticeable share of X.

use super::base::{AnalysisContext, Detector, DetectorDetails, DetectorResult};
use crate::config::PlayfairCalibration;
use crate::error::DetectorError;
use crate::models::CipherType;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayfairFeatures {
    pub even_length: bool,
    pub has_j: bool,
    /// Share of aligned digraphs whose two letters are equal
    pub repeated_pair_rate: f64,
    pub x_rate: f64,
    /// Weighted structural score before penalties
    pub structure_score: f64,
    /// Product of all penalties applied
    pub penalty: f64,
}

impl PlayfairFeatures {
    pub fn measure(text: &[u8]) -> Self {
        let n = text.len();
        let pairs = n / 2;
        let repeated = text.chunks_exact(2).filter(|p| p[0] == p[1]).count();
        Self {
            even_length: n % 2 == 0,
            has_j: text.contains(&b'J'),
            repeated_pair_rate: if pairs > 0 {
                repeated as f64 / pairs as f64
            } else {
                1.0
            },
            x_rate: if n > 0 {
                text.iter().filter(|&&c| c == b'X').count() as f64 / n as f64
            } else {
                0.0
            },
            structure_score: 0.0,
            penalty: 1.0,
        }
    }
}

pub struct PlayfairDetector {
    calibration: PlayfairCalibration,
}

impl PlayfairDetector {
    pub fn new(calibration: PlayfairCalibration) -> Self {
        Self { calibration }
    }
}

impl Default for PlayfairDetector {
    fn default() -> Self {
        Self::new(PlayfairCalibration::default())
    }
}

impl Detector for PlayfairDetector {
    fn name(&self) -> &'static str {
        "playfair"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Playfair
    }

    fn description(&self) -> &'static str {
        "Digraph structure: even length, no J, no doubled pairs, X padding"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let cal = &self.calibration;
        let n = ctx.len();
        if n < cal.min_length {
            return Ok(DetectorResult::skipped(
                self.cipher(),
                format!("needs at least {} letters", cal.min_length),
            ));
        }

        let mut features = PlayfairFeatures::measure(ctx.bytes());
        let indicator = |b: bool| if b { 1.0 } else { 0.0 };
        features.structure_score = cal.even_weight * indicator(features.even_length)
            + cal.no_j_weight * indicator(!features.has_j)
            + cal.distinct_pair_weight * (1.0 - features.repeated_pair_rate)
            + cal.x_weight * (features.x_rate / cal.x_rate_reference).min(1.0);

        let mut penalty = 1.0;
        if !(cal.ic_low..=cal.ic_high).contains(&ctx.ic) {
            penalty *= cal.ic_penalty;
        }
        if ctx.chi_square / n as f64 > cal.chi_per_letter {
            penalty *= cal.chi_penalty;
        }
        if n < cal.very_short_len {
            penalty *= cal.very_short_penalty;
        } else if n < cal.short_len {
            penalty *= cal.short_penalty;
        }
        if features.repeated_pair_rate > cal.repeated_pair_limit {
            penalty *= cal.repeated_pair_penalty;
        }
        features.penalty = penalty;

        let evidence = features.structure_score * penalty;
        debug!(
            "playfair: structure {:.3} penalty {:.3} evidence {:.3}",
            features.structure_score, penalty, evidence
        );
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Playfair(features),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Calibration;
    use crate::text::NormalizedText;

    fn run(raw: &str) -> DetectorResult {
        let text = NormalizedText::new(raw).unwrap();
        let ctx = AnalysisContext::new(&text, &Calibration::default());
        PlayfairDetector::default().detect(&ctx).unwrap()
    }

    #[test]
    fn test_features() {
        let f = PlayfairFeatures::measure(b"AABXCDJX");
        assert!(f.even_length);
        assert!(f.has_j);
        assert!((f.repeated_pair_rate - 0.25).abs() < 1e-12);
        assert!((f.x_rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_pairs_only_counted_when_aligned() {
        // "BAAC": pairs BA, AC; the AA straddles a boundary
        let f = PlayfairFeatures::measure(b"BAAC");
        assert_eq!(f.repeated_pair_rate, 0.0);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(run("ABC").evidence, 0.0);
    }

    #[test]
    fn test_sample_structure() {
        let sample = run("BMODZBXDNABEKUDMUIXMMOUVIF");
        assert!(sample.evidence > 0.0);
        match sample.details {
            DetectorDetails::Playfair(f) => {
                assert!(f.even_length);
                assert!(!f.has_j);
                assert_eq!(f.repeated_pair_rate, 0.0);
                assert!(f.x_rate > 0.05);
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_odd_length_and_j_lower_score() {
        let sample = run("BMODZBXDNABEKUDMUIXMMOUVIF");
        let broken = run("BMODZBXDNABEKUDMUIXMMOUVIFJ");
        assert!(broken.evidence < sample.evidence);
    }

    #[test]
    fn test_doubled_pairs_penalized() {
        let clean = run("BMODZBXDNABEKUDMUIXMMOUVIFQWERTYUIOPASDFGH");
        let doubled = run("BBMMOODDZZBBXXDDNNAABBEEKKUUDDMMUUIIXXMMOO");
        assert!(doubled.evidence < clean.evidence);
    }
}
