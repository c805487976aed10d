//! Text normalization
//!
//! Every detector works on the same letters-only, uppercase view of the
//! input. [`NormalizedText`] is built once per analysis and shared.

use crate::error::AnalysisError;

/// Uppercase A-Z subsequence of the input, in original order.
///
/// Non-ASCII letters are dropped rather than transliterated.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Letters-only view of an input sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    letters: String,
    stripped: usize,
}

impl NormalizedText {
    /// Normalize `raw`, failing when no letters remain
    pub fn new(raw: &str) -> Result<Self, AnalysisError> {
        let letters = normalize(raw);
        if letters.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let stripped = raw.chars().count() - letters.len();
        Ok(Self { letters, stripped })
    }

    pub fn as_str(&self) -> &str {
        &self.letters
    }

    /// Letters as ASCII bytes, each in `b'A'..=b'Z'`
    pub fn as_bytes(&self) -> &[u8] {
        self.letters.as_bytes()
    }

    /// Number of letters (N)
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Characters removed by normalization
    pub fn stripped(&self) -> usize {
        self.stripped
    }

    /// Share of the original characters that survived
    pub fn letter_ratio(&self) -> f64 {
        let total = self.letters.len() + self.stripped;
        if total == 0 {
            return 0.0;
        }
        self.letters.len() as f64 / total as f64
    }

    /// Letters as alphabet indices 0..26
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.letters.bytes().map(|b| (b - b'A') as usize)
    }
}

/// Text shown to the user: the normalized letters, or the uppercased
/// original when non-letters should be kept.
pub fn display_text(raw: &str, normalized: &NormalizedText, strip_non_letters: bool) -> String {
    if strip_non_letters {
        normalized.as_str().to_string()
    } else {
        raw.to_uppercase()
    }
}
