//! Per-call analysis toggles

use crate::error::AnalysisError;
use crate::models::CipherType;
use crate::stats::DEFAULT_TEMPERATURE;
use serde::{Deserialize, Serialize};

/// Which detectors run and how their evidence is combined.
///
/// Every toggle defaults to on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Show the letters-only text instead of the uppercased original.
    /// Presentation only; detectors always see the normalized letters.
    #[serde(default = "default_true")]
    pub strip_non_letters: bool,

    /// Whole-text statistics and the unclassified-substitution detector
    #[serde(default = "default_true")]
    pub basic: bool,

    #[serde(default = "default_true")]
    pub caesar_affine: bool,

    /// Kasiski/autocorrelation key length search for Vigenère
    #[serde(default = "default_true")]
    pub vig_auto_kasiski: bool,

    /// Per-column IC and chi-square analysis for Vigenère
    #[serde(default = "default_true")]
    pub vig_columns: bool,

    #[serde(default = "default_true")]
    pub playfair: bool,

    #[serde(default = "default_true")]
    pub transposition: bool,

    #[serde(default = "default_true")]
    pub adfgx: bool,

    /// Adjust evidence for very short texts
    #[serde(default = "default_true")]
    pub length_bias: bool,

    /// Softmax temperature (default: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_true() -> bool {
    true
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            strip_non_letters: true,
            basic: true,
            caesar_affine: true,
            vig_auto_kasiski: true,
            vig_columns: true,
            playfair: true,
            transposition: true,
            adfgx: true,
            length_bias: true,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AnalysisOptions {
    /// Whether the detector for `cipher` will run
    pub fn is_enabled(&self, cipher: CipherType) -> bool {
        match cipher {
            CipherType::Substitution => self.basic,
            CipherType::Caesar | CipherType::Affine => self.caesar_affine,
            CipherType::Vigenere => self.vig_auto_kasiski || self.vig_columns,
            CipherType::Playfair => self.playfair,
            CipherType::Transposition => self.transposition,
            CipherType::Adfgx => self.adfgx,
        }
    }

    /// Turn off the detector for `cipher`.
    ///
    /// Caesar and Affine share one toggle, so disabling either disables both.
    pub fn disable(&mut self, cipher: CipherType) {
        match cipher {
            CipherType::Substitution => self.basic = false,
            CipherType::Caesar | CipherType::Affine => self.caesar_affine = false,
            CipherType::Vigenere => {
                self.vig_auto_kasiski = false;
                self.vig_columns = false;
            }
            CipherType::Playfair => self.playfair = false,
            CipherType::Transposition => self.transposition = false,
            CipherType::Adfgx => self.adfgx = false,
        }
    }

    pub fn enabled_count(&self) -> usize {
        CipherType::ALL.iter().filter(|c| self.is_enabled(**c)).count()
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(AnalysisError::InvalidCalibration(format!(
                "temperature must be a positive number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let options = AnalysisOptions::default();
        assert_eq!(options.enabled_count(), 7);
        assert!(options.length_bias);
        assert!((options.temperature - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_disable_caesar_turns_off_affine() {
        let mut options = AnalysisOptions::default();
        options.disable(CipherType::Caesar);
        assert!(!options.is_enabled(CipherType::Affine));
        assert_eq!(options.enabled_count(), 5);
    }

    #[test]
    fn test_vigenere_needs_one_of_two_toggles() {
        let mut options = AnalysisOptions {
            vig_columns: false,
            ..Default::default()
        };
        assert!(options.is_enabled(CipherType::Vigenere));
        options.vig_auto_kasiski = false;
        assert!(!options.is_enabled(CipherType::Vigenere));
    }

    #[test]
    fn test_bad_temperature_rejected() {
        let options = AnalysisOptions {
            temperature: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
        let options = AnalysisOptions {
            temperature: f64::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: AnalysisOptions = toml::from_str("playfair = false").unwrap();
        assert!(!options.playfair);
        assert!(options.caesar_affine);
        assert!((options.temperature - 0.7).abs() < 1e-12);
    }
}
