//! Letter frequencies and goodness of fit against English

/// English letter frequencies, A..Z
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094, 0.06966, 0.00153,
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056,
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
];

/// 26-bucket letter histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: [u32; 26],
    total: usize,
}

impl FrequencyTable {
    /// Count letters of an A-Z byte string. Other bytes are ignored.
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut table = Self::default();
        for &b in text {
            if b.is_ascii_uppercase() {
                table.counts[(b - b'A') as usize] += 1;
                table.total += 1;
            }
        }
        table
    }

    /// Count alphabet indices (0..26)
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut table = Self::default();
        for i in indices {
            table.counts[i % 26] += 1;
            table.total += 1;
        }
        table
    }

    pub fn counts(&self) -> &[u32; 26] {
        &self.counts
    }

    pub fn count(&self, letter: u8) -> u32 {
        if letter.is_ascii_uppercase() {
            self.counts[(letter - b'A') as usize]
        } else {
            0
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of letters with a non-zero count
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn chi_square(&self) -> f64 {
        chi_square(&self.counts, self.total)
    }

    pub fn index_of_coincidence(&self) -> f64 {
        super::coincidence::ic_from_counts(&self.counts, self.total)
    }
}

/// Σ (observed - expected)² / expected with expected = N × English frequency
pub fn chi_square(counts: &[u32; 26], total: usize) -> f64 {
    let n = total as f64;
    counts
        .iter()
        .zip(ENGLISH_FREQUENCIES.iter())
        .map(|(&observed, &p)| {
            let mut expected = n * p;
            if expected == 0.0 {
                expected = 1e-9;
            }
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Expected number of distinct letters in an English sample of length `n`
pub fn expected_distinct_letters(n: usize) -> f64 {
    let n = n as i32;
    ENGLISH_FREQUENCIES
        .iter()
        .map(|p| 1.0 - (1.0 - p).powi(n))
        .sum()
}

/// How much of the alphabet a sample uses relative to English of the same
/// length, scaled so that `ratio` of the expectation already counts as full.
pub fn alphabet_coverage(distinct: usize, n: usize, ratio: f64) -> f64 {
    let expected = expected_distinct_letters(n) * ratio;
    if expected <= 0.0 {
        return 0.0;
    }
    super::clamp01(distinct as f64 / expected)
}
