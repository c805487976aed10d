//! Heuristic constants for every detector
//!
//! Defaults reproduce the stock classifier. Any field can be overridden
//! from the `[calibration.*]` tables of `clairvoyance.toml`; missing fields
//! keep their defaults.

use crate::error::AnalysisError;
use crate::models::CipherType;
use serde::{Deserialize, Serialize};

/// All tunable constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Share of the expected English alphabet that counts as full coverage
    pub coverage_ratio: f64,
    /// Floor applied to every evidence value before the softmax
    pub evidence_floor: f64,
    /// Evidence substituted for a failed detector
    pub fallback_evidence: f64,
    /// Upper bound of a single detector's evidence
    pub max_evidence: f64,
    pub caesar: CaesarCalibration,
    pub affine: AffineCalibration,
    pub periodicity: PeriodicityCalibration,
    pub vigenere: VigenereCalibration,
    pub playfair: PlayfairCalibration,
    pub transposition: TranspositionCalibration,
    pub substitution: SubstitutionCalibration,
    pub adfgx: AdfgxCalibration,
    pub length_bias: LengthBiasCalibration,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            coverage_ratio: 0.7,
            evidence_floor: 1e-3,
            fallback_evidence: 0.05,
            max_evidence: 1.5,
            caesar: CaesarCalibration::default(),
            affine: AffineCalibration::default(),
            periodicity: PeriodicityCalibration::default(),
            vigenere: VigenereCalibration::default(),
            playfair: PlayfairCalibration::default(),
            transposition: TranspositionCalibration::default(),
            substitution: SubstitutionCalibration::default(),
            adfgx: AdfgxCalibration::default(),
            length_bias: LengthBiasCalibration::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaesarCalibration {
    /// Chi-square at which evidence reaches zero
    pub chi_threshold: f64,
    pub ic_band_low: f64,
    pub ic_band_high: f64,
    /// Multiplier when the overall IC is English-like
    pub ic_bonus: f64,
    /// Multiplier when the best shift is 0
    pub identity_penalty: f64,
}

impl Default for CaesarCalibration {
    fn default() -> Self {
        Self {
            chi_threshold: 400.0,
            ic_band_low: 0.06,
            ic_band_high: 0.08,
            ic_bonus: 1.15,
            identity_penalty: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineCalibration {
    pub chi_threshold: f64,
    pub ic_band_low: f64,
    pub ic_band_high: f64,
    pub ic_bonus: f64,
    /// Multiplier when a = 1 (the key is a plain shift)
    pub shift_key_penalty: f64,
    /// Extra multiplier for the identity key (1, 0)
    pub identity_penalty: f64,
}

impl Default for AffineCalibration {
    fn default() -> Self {
        Self {
            chi_threshold: 450.0,
            ic_band_low: 0.06,
            ic_band_high: 0.08,
            ic_bonus: 1.15,
            shift_key_penalty: 0.8,
            identity_penalty: 0.5,
        }
    }
}

/// Autocorrelation, Kasiski and key length ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicityCalibration {
    pub max_lag: usize,
    pub min_key_length: usize,
    pub max_key_length: usize,
    pub kasiski_min_len: usize,
    pub kasiski_max_len: usize,
    /// Search longer repeats and weight them up
    pub enhanced_kasiski: bool,
    pub enhanced_max_len: usize,
    /// Repeats at least this long get `long_repeat_weight` in enhanced mode
    pub long_repeat_len: usize,
    pub long_repeat_weight: f64,
    pub max_distances: usize,
    pub gcd_min: usize,
    pub gcd_max: usize,
    /// Autocorrelation expected from unrelated letters
    pub ac_baseline: f64,
    pub ac_log_weight: f64,
    /// Key lengths below this pivot have their GCD mass scaled by (k/pivot)^exponent
    pub small_divisor_pivot: f64,
    pub small_divisor_exponent: i32,
    /// Length rewards for k <= 4, <= 8, <= 12 and above
    pub length_rewards: [f64; 4],
    pub divisor_penalty: f64,
    pub strong_ac_threshold: f64,
    pub strong_ac_bonus: f64,
    pub top_candidates: usize,
}

impl Default for PeriodicityCalibration {
    fn default() -> Self {
        Self {
            max_lag: 40,
            min_key_length: 2,
            max_key_length: 16,
            kasiski_min_len: 3,
            kasiski_max_len: 5,
            enhanced_kasiski: false,
            enhanced_max_len: 7,
            long_repeat_len: 5,
            long_repeat_weight: 2.0,
            max_distances: 1500,
            gcd_min: 2,
            gcd_max: 20,
            ac_baseline: 0.045,
            ac_log_weight: 0.15,
            small_divisor_pivot: 5.0,
            small_divisor_exponent: 4,
            length_rewards: [1.0, 1.15, 1.25, 1.3],
            divisor_penalty: 0.5,
            strong_ac_threshold: 0.055,
            strong_ac_bonus: 1.25,
            top_candidates: 8,
        }
    }
}

impl PeriodicityCalibration {
    /// Longest repeated n-gram searched by Kasiski
    pub fn kasiski_max(&self) -> usize {
        if self.enhanced_kasiski {
            self.enhanced_max_len
        } else {
            self.kasiski_max_len
        }
    }

    /// Weight of a repeat of length `len`
    pub fn repeat_weight(&self, len: usize) -> f64 {
        if self.enhanced_kasiski && len >= self.long_repeat_len {
            self.long_repeat_weight
        } else {
            1.0
        }
    }

    pub fn length_reward(&self, k: usize) -> f64 {
        match k {
            0..=4 => self.length_rewards[0],
            5..=8 => self.length_rewards[1],
            9..=12 => self.length_rewards[2],
            _ => self.length_rewards[3],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VigenereCalibration {
    pub min_length: usize,
    /// IC a correctly split column should show
    pub column_ic_target: f64,
    pub column_ic_tolerance: f64,
    /// Mean column chi-square at which the chi term reaches zero
    pub chi_threshold: f64,
    /// Autocorrelation above baseline that counts as full periodicity
    pub ac_range: f64,
    pub ic_weight: f64,
    pub chi_weight: f64,
    pub periodicity_weight: f64,
    pub consistency_weight: f64,
    /// Periodicity term used when the Kasiski search is off
    pub neutral_periodicity: f64,
    pub consistency_tolerance: f64,
    /// A divisor of the best length wins if its composite is within this margin
    pub divisor_margin: f64,
    /// ...and its IC score is at least this share of the best one
    pub divisor_ic_ratio: f64,
    pub evidence_gain: f64,
    pub lift_floor: f64,
    /// Column IC lift over the overall IC that counts as full lift
    pub lift_scale: f64,
    pub gcd_peak_bonus: f64,
    pub friedman_tolerance: f64,
    pub friedman_bonus: f64,
    /// Gain applied to the periodicity-only score when column analysis is off
    pub periodicity_only_gain: f64,
    /// Overall IC below which the text looks polyalphabetic
    pub polyalphabetic_ic: f64,
    /// Multiplier when the overall IC looks monoalphabetic (columns off)
    pub monoalphabetic_gate: f64,
}

impl Default for VigenereCalibration {
    fn default() -> Self {
        Self {
            min_length: 8,
            column_ic_target: 0.0667,
            column_ic_tolerance: 0.025,
            chi_threshold: 150.0,
            ac_range: 0.04,
            ic_weight: 0.35,
            chi_weight: 0.25,
            periodicity_weight: 0.25,
            consistency_weight: 0.15,
            neutral_periodicity: 0.3,
            consistency_tolerance: 0.015,
            divisor_margin: 0.08,
            divisor_ic_ratio: 0.7,
            evidence_gain: 1.4,
            lift_floor: 0.2,
            lift_scale: 0.015,
            gcd_peak_bonus: 1.1,
            friedman_tolerance: 0.008,
            friedman_bonus: 1.1,
            periodicity_only_gain: 1.2,
            polyalphabetic_ic: 0.058,
            monoalphabetic_gate: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfairCalibration {
    pub min_length: usize,
    pub even_weight: f64,
    pub no_j_weight: f64,
    pub distinct_pair_weight: f64,
    pub x_weight: f64,
    /// X rate that earns the full X term
    pub x_rate_reference: f64,
    pub ic_low: f64,
    pub ic_high: f64,
    pub ic_penalty: f64,
    /// Chi-square per letter above which the text is too far from English
    pub chi_per_letter: f64,
    pub chi_penalty: f64,
    pub very_short_len: usize,
    pub very_short_penalty: f64,
    pub short_len: usize,
    pub short_penalty: f64,
    /// Playfair never enciphers a doubled digraph
    pub repeated_pair_limit: f64,
    pub repeated_pair_penalty: f64,
}

impl Default for PlayfairCalibration {
    fn default() -> Self {
        Self {
            min_length: 4,
            even_weight: 0.35,
            no_j_weight: 0.25,
            distinct_pair_weight: 0.25,
            x_weight: 0.15,
            x_rate_reference: 0.05,
            ic_low: 0.045,
            ic_high: 0.12,
            ic_penalty: 0.6,
            chi_per_letter: 8.0,
            chi_penalty: 0.6,
            very_short_len: 20,
            very_short_penalty: 0.5,
            short_len: 40,
            short_penalty: 0.8,
            repeated_pair_limit: 0.02,
            repeated_pair_penalty: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspositionCalibration {
    pub chi_threshold: f64,
    /// Below this Englishness only the weak fallback applies
    pub englishness_floor: f64,
    pub fallback_weight: f64,
    pub englishness_weight: f64,
    pub chi_weight: f64,
    pub ic_weight: f64,
    pub ic_low: f64,
    pub ic_high: f64,
    pub ic_decay: f64,
    pub strong_englishness: f64,
    pub strong_bonus: f64,
    /// Multiplier when the chi term is zero
    pub no_fit_penalty: f64,
}

impl Default for TranspositionCalibration {
    fn default() -> Self {
        Self {
            chi_threshold: 300.0,
            englishness_floor: 0.15,
            fallback_weight: 0.15,
            englishness_weight: 0.35,
            chi_weight: 0.35,
            ic_weight: 0.30,
            ic_low: 0.060,
            ic_high: 0.072,
            ic_decay: 0.01,
            strong_englishness: 0.85,
            strong_bonus: 1.2,
            no_fit_penalty: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionCalibration {
    pub ic_low: f64,
    pub ic_high: f64,
    pub ic_decay: f64,
    /// Chi-square where divergence from English starts counting
    pub chi_offset: f64,
    pub chi_range: f64,
    pub weight: f64,
}

impl Default for SubstitutionCalibration {
    fn default() -> Self {
        Self {
            ic_low: 0.058,
            ic_high: 0.078,
            ic_decay: 0.012,
            chi_offset: 150.0,
            chi_range: 350.0,
            weight: 0.65,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdfgxCalibration {
    pub adfgx_evidence: f64,
    pub adfgvx_evidence: f64,
}

impl Default for AdfgxCalibration {
    fn default() -> Self {
        Self {
            adfgx_evidence: 0.9,
            adfgvx_evidence: 1.0,
        }
    }
}

/// Per-cipher multipliers for one length band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasFactors {
    pub substitution: f64,
    pub caesar: f64,
    pub affine: f64,
    pub vigenere: f64,
    pub playfair: f64,
    pub transposition: f64,
    pub adfgx: f64,
}

impl Default for BiasFactors {
    fn default() -> Self {
        Self {
            substitution: 1.0,
            caesar: 1.0,
            affine: 1.0,
            vigenere: 1.0,
            playfair: 1.0,
            transposition: 1.0,
            adfgx: 1.0,
        }
    }
}

impl BiasFactors {
    pub fn factor(&self, cipher: CipherType) -> f64 {
        match cipher {
            CipherType::Substitution => self.substitution,
            CipherType::Caesar => self.caesar,
            CipherType::Affine => self.affine,
            CipherType::Vigenere => self.vigenere,
            CipherType::Playfair => self.playfair,
            CipherType::Transposition => self.transposition,
            CipherType::Adfgx => self.adfgx,
        }
    }
}

/// Length bands. Periodic and digraph statistics need length; short texts
/// lean toward the monoalphabetic families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthBiasCalibration {
    pub very_short_max: usize,
    pub short_max: usize,
    pub very_short: BiasFactors,
    pub short: BiasFactors,
}

impl Default for LengthBiasCalibration {
    fn default() -> Self {
        Self {
            very_short_max: 20,
            short_max: 50,
            very_short: BiasFactors {
                caesar: 2.0,
                affine: 1.6,
                transposition: 1.5,
                vigenere: 0.3,
                playfair: 0.5,
                adfgx: 0.6,
                substitution: 1.0,
            },
            short: BiasFactors {
                caesar: 1.5,
                affine: 1.3,
                transposition: 1.2,
                vigenere: 0.6,
                playfair: 0.75,
                adfgx: 0.8,
                substitution: 1.0,
            },
        }
    }
}

impl LengthBiasCalibration {
    /// Multipliers for a text of `n` letters, if it falls in a band
    pub fn band(&self, n: usize) -> Option<&BiasFactors> {
        if n <= self.very_short_max {
            Some(&self.very_short)
        } else if n <= self.short_max {
            Some(&self.short)
        } else {
            None
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), AnalysisError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidCalibration(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), AnalysisError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidCalibration(format!(
            "{} must be zero or greater, got {}",
            name, value
        )))
    }
}

impl Calibration {
    /// Reject values that would make a detector divide by zero or
    /// produce meaningless ranges
    pub fn validate(&self) -> Result<(), AnalysisError> {
        positive("coverage_ratio", self.coverage_ratio)?;
        positive("evidence_floor", self.evidence_floor)?;
        non_negative("fallback_evidence", self.fallback_evidence)?;
        positive("max_evidence", self.max_evidence)?;

        positive("caesar.chi_threshold", self.caesar.chi_threshold)?;
        positive("affine.chi_threshold", self.affine.chi_threshold)?;

        let p = &self.periodicity;
        if p.min_key_length < 2 || p.max_key_length < p.min_key_length {
            return Err(AnalysisError::InvalidCalibration(format!(
                "periodicity key length range {}..={} is invalid (minimum is 2)",
                p.min_key_length, p.max_key_length
            )));
        }
        if p.kasiski_min_len < 2 || p.kasiski_max() < p.kasiski_min_len {
            return Err(AnalysisError::InvalidCalibration(format!(
                "periodicity Kasiski n-gram range {}..={} is invalid",
                p.kasiski_min_len,
                p.kasiski_max()
            )));
        }
        if p.gcd_min < 2 || p.gcd_max < p.gcd_min {
            return Err(AnalysisError::InvalidCalibration(format!(
                "periodicity GCD range {}..={} is invalid",
                p.gcd_min, p.gcd_max
            )));
        }
        if p.max_distances == 0 || p.top_candidates == 0 {
            return Err(AnalysisError::InvalidCalibration(
                "periodicity max_distances and top_candidates must be at least 1".to_string(),
            ));
        }
        positive("periodicity.small_divisor_pivot", p.small_divisor_pivot)?;
        positive("periodicity.long_repeat_weight", p.long_repeat_weight)?;

        let v = &self.vigenere;
        positive("vigenere.column_ic_tolerance", v.column_ic_tolerance)?;
        positive("vigenere.chi_threshold", v.chi_threshold)?;
        positive("vigenere.ac_range", v.ac_range)?;
        positive("vigenere.consistency_tolerance", v.consistency_tolerance)?;
        positive("vigenere.lift_scale", v.lift_scale)?;

        positive("playfair.x_rate_reference", self.playfair.x_rate_reference)?;

        let t = &self.transposition;
        positive("transposition.chi_threshold", t.chi_threshold)?;
        positive("transposition.ic_decay", t.ic_decay)?;

        let s = &self.substitution;
        positive("substitution.ic_decay", s.ic_decay)?;
        positive("substitution.chi_range", s.chi_range)?;

        for band in [&self.length_bias.very_short, &self.length_bias.short] {
            for cipher in CipherType::ALL {
                non_negative("length_bias factor", band.factor(cipher))?;
            }
        }
        Ok(())
    }
}
