//! Self-coincidence at a lag

/// Fraction of positions where the text matches itself shifted by `t`,
/// for t = 1..=min(max_lag, N-1). Index 0 holds lag 1.
pub fn autocorrelation(text: &[u8], max_lag: usize) -> Vec<f64> {
    let n = text.len();
    let last = max_lag.min(n.saturating_sub(1));
    (1..=last)
        .map(|t| {
            let matches = text
                .iter()
                .zip(&text[t..])
                .filter(|(a, b)| a == b)
                .count();
            matches as f64 / (n - t).max(1) as f64
        })
        .collect()
}

/// Value for lag `k`, or 0 when the lag was not measured
pub fn lag_value(ac: &[f64], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    ac.get(k - 1).copied().unwrap_or(0.0)
}
