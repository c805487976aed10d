//! Core data models for Clairvoyance
//!
//! The closed set of cipher families and the report an analysis produces.

use crate::detectors::{AdfgxVariant, DetectorOutcome};
use crate::periodicity::GcdHistogram;
use crate::scoring::{EvidenceMap, ProbabilityMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cipher families the classifier can declare.
///
/// Variant order is the canonical order: maps keyed by `CipherType`
/// iterate in it, and exact probability ties resolve to the earlier variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CipherType {
    Substitution,
    Caesar,
    Affine,
    Vigenere,
    Playfair,
    Transposition,
    Adfgx,
}

impl CipherType {
    pub const ALL: [CipherType; 7] = [
        CipherType::Substitution,
        CipherType::Caesar,
        CipherType::Affine,
        CipherType::Vigenere,
        CipherType::Playfair,
        CipherType::Transposition,
        CipherType::Adfgx,
    ];

    /// Stable lowercase identifier, as used in JSON and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            CipherType::Substitution => "substitution",
            CipherType::Caesar => "caesar",
            CipherType::Affine => "affine",
            CipherType::Vigenere => "vigenere",
            CipherType::Playfair => "playfair",
            CipherType::Transposition => "transposition",
            CipherType::Adfgx => "adfgx",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CipherType::Substitution => "Substitution",
            CipherType::Caesar => "Caesar",
            CipherType::Affine => "Affine",
            CipherType::Vigenere => "Vigenère",
            CipherType::Playfair => "Playfair",
            CipherType::Transposition => "Transposition",
            CipherType::Adfgx => "ADFGX/ADFGVX",
        }
    }

    /// Static one-line description of the family
    pub fn description(&self) -> &'static str {
        match self {
            CipherType::Substitution => {
                "Simple substitution: each letter is replaced one-to-one by another letter"
            }
            CipherType::Caesar => {
                "The most basic cipher: every letter is shifted by a fixed amount, e.g. A→D, B→E, C→F"
            }
            CipherType::Affine => {
                "Letters are transformed by the formula (ax + b) mod 26; a generalization of Caesar"
            }
            CipherType::Vigenere => {
                "Polyalphabetic cipher combining several Caesar shifts selected by a keyword"
            }
            CipherType::Playfair => "Digraph substitution over a 5x5 key square, two letters at a time",
            CipherType::Transposition => "The letters are kept but their order is rearranged",
            CipherType::Adfgx => {
                "Used by Germany in World War I; the text is written with the letters ADFGX(V) only"
            }
        }
    }
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CipherType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substitution" | "basic" => Ok(CipherType::Substitution),
            "caesar" => Ok(CipherType::Caesar),
            "affine" => Ok(CipherType::Affine),
            "vigenere" | "vigenère" => Ok(CipherType::Vigenere),
            "playfair" => Ok(CipherType::Playfair),
            "transposition" | "columnar" => Ok(CipherType::Transposition),
            "adfgx" | "adfgvx" => Ok(CipherType::Adfgx),
            _ => Err(format!(
                "Unknown cipher type: {}. Valid: substitution, caesar, affine, vigenere, playfair, transposition, adfgx",
                s
            )),
        }
    }
}

/// Declared classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Winner {
    pub cipher: CipherType,
    pub probability: f64,
    pub description: &'static str,
}

impl Winner {
    pub fn new(cipher: CipherType, probability: f64) -> Self {
        Self {
            cipher,
            probability,
            description: cipher.description(),
        }
    }
}

/// Whole-text statistics, reported when the `basic` toggle is on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub index_of_coincidence: f64,
    pub chi_square: f64,
    /// Clamped Englishness as a percentage, 0-100
    pub englishness_percent: f64,
    pub unique_letters: usize,
}

/// Affine key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffineKey {
    pub a: u8,
    pub b: u8,
}

impl fmt::Display for AffineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={}, b={}", self.a, self.b)
    }
}

/// Parameters recovered as a byproduct of detection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectorStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caesar_shift: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affine_key: Option<AffineKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vigenere_key_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vigenere_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adfgx_variant: Option<AdfgxVariant>,
}

/// Series used to draw charts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualData {
    /// Letter counts A..Z
    pub frequencies: Vec<u32>,
    /// Autocorrelation for lags 1.. (index 0 is lag 1)
    pub autocorrelation: Vec<f64>,
    pub gcd_histogram: GcdHistogram,
}

/// Full result of one analysis call
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Normalized A-Z letters
    pub text: String,
    /// Text to show the user (see `strip_non_letters`)
    pub display_text: String,
    pub length: usize,
    pub stripped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicStats>,
    pub detector_stats: DetectorStats,
    pub visual: VisualData,
    /// Evidence as returned by the detectors
    pub raw_evidence: EvidenceMap,
    /// Evidence after length bias and flooring
    pub evidence: EvidenceMap,
    pub probabilities: ProbabilityMap,
    pub winner: Winner,
    /// Cipher types whose detector failed and got fallback evidence
    pub degraded: Vec<CipherType>,
    pub detectors: Vec<DetectorOutcome>,
}

impl AnalysisReport {
    /// Cipher types ordered by probability, highest first
    pub fn ranking(&self) -> Vec<(CipherType, f64)> {
        let mut ranked: Vec<(CipherType, f64)> =
            self.probabilities.iter().map(|(c, p)| (*c, *p)).collect();
        // Stable sort keeps enum order for equal probabilities
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Outcome recorded for one cipher's detector
    pub fn outcome(&self, cipher: CipherType) -> Option<&DetectorOutcome> {
        self.detectors.iter().find(|o| o.cipher == cipher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cipher_type_order_is_tie_break_order() {
        let mut sorted = CipherType::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, CipherType::ALL.to_vec());
        assert!(CipherType::Substitution < CipherType::Caesar);
        assert!(CipherType::Transposition < CipherType::Adfgx);
    }

    #[test]
    fn test_cipher_type_round_trip_through_id() {
        for cipher in CipherType::ALL {
            assert_eq!(cipher.id().parse::<CipherType>().unwrap(), cipher);
        }
        assert_eq!("Vigenère".parse::<CipherType>().unwrap(), CipherType::Vigenere);
        assert_eq!("ADFGVX".parse::<CipherType>().unwrap(), CipherType::Adfgx);
        assert!("enigma".parse::<CipherType>().is_err());
    }

    #[test]
    fn test_cipher_type_serializes_lowercase() {
        let json = serde_json::to_string(&CipherType::Vigenere).unwrap();
        assert_eq!(json, "\"vigenere\"");
    }

    #[test]
    fn test_winner_carries_description() {
        let winner = Winner::new(CipherType::Caesar, 0.8);
        assert!(winner.description.contains("shifted"));
    }

    #[test]
    fn test_affine_key_display() {
        assert_eq!(AffineKey { a: 5, b: 8 }.to_string(), "a=5, b=8");
    }
}
