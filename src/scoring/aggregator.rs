//! Length bias, flooring, softmax and winner selection

use super::{EvidenceMap, ProbabilityMap};
use crate::config::{Calibration, LengthBiasCalibration};
use crate::models::Winner;
use crate::stats::softmax;
use tracing::debug;

/// Result of aggregating one evidence map
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Evidence after bias and flooring
    pub evidence: EvidenceMap,
    pub probabilities: ProbabilityMap,
    pub winner: Winner,
}

pub struct EvidenceAggregator {
    temperature: f64,
    floor: f64,
    length_bias: Option<LengthBiasCalibration>,
}

impl EvidenceAggregator {
    pub fn new(temperature: f64, floor: f64) -> Self {
        Self {
            temperature,
            floor,
            length_bias: None,
        }
    }

    /// Aggregator configured from calibration; `length_bias` turns the bias on
    pub fn from_calibration(calibration: &Calibration, temperature: f64, length_bias: bool) -> Self {
        let aggregator = Self::new(temperature, calibration.evidence_floor);
        if length_bias {
            aggregator.with_length_bias(calibration.length_bias.clone())
        } else {
            aggregator
        }
    }

    pub fn with_length_bias(mut self, bias: LengthBiasCalibration) -> Self {
        self.length_bias = Some(bias);
        self
    }

    /// Apply the length band multipliers and the floor
    pub fn adjust(&self, raw: &EvidenceMap, length: usize) -> EvidenceMap {
        let band = self.length_bias.as_ref().and_then(|b| b.band(length));
        raw.iter()
            .map(|(cipher, evidence)| {
                let factor = band.map_or(1.0, |f| f.factor(cipher));
                (cipher, (evidence * factor).max(self.floor))
            })
            .collect()
    }

    pub fn probabilities(&self, adjusted: &EvidenceMap) -> ProbabilityMap {
        let probs = softmax(&adjusted.values(), self.temperature);
        adjusted.ciphers().zip(probs).collect()
    }

    /// Highest probability; the earliest cipher type wins exact ties
    pub fn winner(probabilities: &ProbabilityMap) -> Option<Winner> {
        let mut best: Option<(&crate::models::CipherType, f64)> = None;
        for (cipher, &p) in probabilities.iter() {
            match best {
                Some((_, bp)) if bp >= p => {}
                _ => best = Some((cipher, p)),
            }
        }
        best.map(|(cipher, p)| Winner::new(*cipher, p))
    }

    /// Adjust, normalize and pick the winner. `None` for an empty map.
    pub fn aggregate(&self, raw: &EvidenceMap, length: usize) -> Option<Aggregate> {
        let evidence = self.adjust(raw, length);
        let probabilities = self.probabilities(&evidence);
        let winner = Self::winner(&probabilities)?;
        debug!(
            "Aggregated {} evidence values: winner {} at {:.3}",
            evidence.len(),
            winner.cipher,
            winner.probability
        );
        Some(Aggregate {
            evidence,
            probabilities,
            winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CipherType;

    fn evidence(values: &[(CipherType, f64)]) -> EvidenceMap {
        values.iter().copied().collect()
    }

    fn aggregator(bias: bool) -> EvidenceAggregator {
        EvidenceAggregator::from_calibration(&Calibration::default(), 0.7, bias)
    }

    #[test]
    fn test_floor_applied() {
        let raw = evidence(&[(CipherType::Caesar, 0.0), (CipherType::Adfgx, 0.9)]);
        let adjusted = aggregator(false).adjust(&raw, 100);
        assert_eq!(adjusted.get(CipherType::Caesar), Some(1e-3));
        assert_eq!(adjusted.get(CipherType::Adfgx), Some(0.9));
    }

    #[test]
    fn test_bias_bands() {
        let raw = evidence(&[(CipherType::Caesar, 0.4), (CipherType::Vigenere, 0.4)]);
        let agg = aggregator(true);
        let very_short = agg.adjust(&raw, 10);
        assert!((very_short.get(CipherType::Caesar).unwrap() - 0.8).abs() < 1e-12);
        assert!((very_short.get(CipherType::Vigenere).unwrap() - 0.12).abs() < 1e-12);
        let short = agg.adjust(&raw, 50);
        assert!((short.get(CipherType::Caesar).unwrap() - 0.6).abs() < 1e-12);
        let long = agg.adjust(&raw, 51);
        assert_eq!(long, raw);
    }

    #[test]
    fn test_bias_disabled() {
        let raw = evidence(&[(CipherType::Caesar, 0.4)]);
        assert_eq!(aggregator(false).adjust(&raw, 5), raw);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let raw = evidence(&[
            (CipherType::Substitution, 0.1),
            (CipherType::Caesar, 0.8),
            (CipherType::Affine, 0.6),
            (CipherType::Vigenere, 0.0),
        ]);
        let agg = aggregator(true).aggregate(&raw, 200).unwrap();
        assert!((agg.probabilities.total() - 1.0).abs() < 1e-9);
        assert_eq!(agg.probabilities.len(), raw.len());
        assert_eq!(agg.winner.cipher, CipherType::Caesar);
    }

    #[test]
    fn test_ties_go_to_earlier_cipher() {
        let raw = evidence(&[
            (CipherType::Transposition, 0.5),
            (CipherType::Affine, 0.5),
            (CipherType::Playfair, 0.5),
        ]);
        let agg = aggregator(false).aggregate(&raw, 200).unwrap();
        assert_eq!(agg.winner.cipher, CipherType::Affine);
    }

    #[test]
    fn test_short_text_shifts_mass_toward_caesar() {
        let raw = evidence(&[(CipherType::Caesar, 0.5), (CipherType::Vigenere, 0.5)]);
        let agg = aggregator(true);
        let short = agg.aggregate(&raw, 15).unwrap();
        let long = agg.aggregate(&raw, 500).unwrap();
        assert!(short.probabilities.get(CipherType::Caesar) > long.probabilities.get(CipherType::Caesar));
        assert!(
            short.probabilities.get(CipherType::Vigenere)
                < long.probabilities.get(CipherType::Vigenere)
        );
    }

    #[test]
    fn test_empty_has_no_winner() {
        assert!(aggregator(true).aggregate(&EvidenceMap::new(), 10).is_none());
    }
}
