//! Bigram/trigram "Englishness"

/// Most common English bigrams
pub const TOP_BIGRAMS: [&[u8; 2]; 30] = [
    b"TH", b"HE", b"IN", b"ER", b"AN", b"RE", b"ON", b"AT", b"EN", b"ND", b"TI", b"ES", b"OR",
    b"TE", b"OF", b"ED", b"IS", b"IT", b"AL", b"AR", b"ST", b"TO", b"NT", b"NG", b"SE", b"HA",
    b"AS", b"OU", b"IO", b"LE",
];

/// Most common English trigrams
pub const TOP_TRIGRAMS: [&[u8; 3]; 18] = [
    b"THE", b"ING", b"AND", b"HER", b"ERE", b"ENT", b"THA", b"NTH", b"ETH", b"HES", b"EST",
    b"FOR", b"TIO", b"TER", b"ATI", b"HAT", b"ION", b"ERS",
];

const BIGRAM_REFERENCE_RATE: f64 = 0.05;
const TRIGRAM_REFERENCE_RATE: f64 = 0.02;
const MIN_LENGTH: usize = 4;

/// Overlap of a text with common English n-grams
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Englishness {
    pub bigram_rate: f64,
    pub trigram_rate: f64,
}

impl Englishness {
    pub fn measure(text: &[u8]) -> Self {
        let n = text.len();
        if n < MIN_LENGTH {
            return Self::default();
        }
        let bigram_hits = text
            .windows(2)
            .filter(|w| TOP_BIGRAMS.iter().any(|b| b[..] == **w))
            .count();
        let trigram_hits = text
            .windows(3)
            .filter(|w| TOP_TRIGRAMS.iter().any(|t| t[..] == **w))
            .count();
        Self {
            bigram_rate: bigram_hits as f64 / (n - 1).max(1) as f64,
            trigram_rate: trigram_hits as f64 / (n - 2).max(1) as f64,
        }
    }

    /// Unclamped combined value, used to rank candidate decryptions
    pub fn raw(&self) -> f64 {
        0.6 * (self.bigram_rate / BIGRAM_REFERENCE_RATE)
            + 0.4 * (self.trigram_rate / TRIGRAM_REFERENCE_RATE)
    }

    /// Combined value clamped to [0, 1]
    pub fn score(&self) -> f64 {
        super::clamp01(self.raw())
    }

    pub fn percent(&self) -> f64 {
        (self.score() * 100.0).round()
    }
}
