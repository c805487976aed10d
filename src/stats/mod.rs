//! Statistical primitives shared by every detector
//!
//! - [`FrequencyTable`] letter counts and chi-square against English
//! - [`index_of_coincidence`]
//! - [`Englishness`] bigram/trigram overlap
//! - [`softmax`]

mod coincidence;
mod englishness;
mod frequency;
mod softmax;

pub use coincidence::{friedman_expected_ic, index_of_coincidence, ENGLISH_IC, RANDOM_IC};
pub use englishness::{Englishness, TOP_BIGRAMS, TOP_TRIGRAMS};
pub use frequency::{
    alphabet_coverage, chi_square, expected_distinct_letters, FrequencyTable, ENGLISH_FREQUENCIES,
};
pub use softmax::{softmax, DEFAULT_TEMPERATURE};

/// Clamp to [0, 1]. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
