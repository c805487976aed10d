//! Temperature softmax

/// Temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// exp(xᵢ/τ) / Σ exp(xⱼ/τ), shifted by the maximum for stability.
///
/// A degenerate denominator is floored at 1. Non-positive or non-finite
/// temperatures fall back to [`DEFAULT_TEMPERATURE`].
pub fn softmax(scores: &[f64], temperature: f64) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let tau = if temperature.is_finite() && temperature > 0.0 {
        temperature
    } else {
        DEFAULT_TEMPERATURE
    };
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| ((s - max) / tau).exp()).collect();
    let mut sum: f64 = exps.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        sum = 1.0;
    }
    exps.into_iter().map(|e| e / sum).collect()
}
