//! Index of coincidence

use super::FrequencyTable;

/// IC of English plaintext
pub const ENGLISH_IC: f64 = 0.0667;
/// IC of uniformly random letters, 1/26
pub const RANDOM_IC: f64 = 0.0385;

/// Σ nᵢ(nᵢ-1) / N(N-1); 0 when N < 2
pub fn index_of_coincidence(text: &[u8]) -> f64 {
    FrequencyTable::from_bytes(text).index_of_coincidence()
}

pub(crate) fn ic_from_counts(counts: &[u32; 26], total: usize) -> f64 {
    if total < 2 {
        return 0.0;
    }
    let n = total as f64;
    let sum: f64 = counts
        .iter()
        .map(|&c| {
            let c = c as f64;
            c * (c - 1.0)
        })
        .sum();
    sum / (n * (n - 1.0))
}

/// Overall IC expected from a period-`k` polyalphabetic cipher over English
pub fn friedman_expected_ic(k: usize) -> f64 {
    if k == 0 {
        return ENGLISH_IC;
    }
    let k = k as f64;
    ENGLISH_IC / k + RANDOM_IC * (k - 1.0) / k
}
