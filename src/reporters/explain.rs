//! Human-readable reasons behind a classification
//!
//! Three kinds of notes are produced from a finished [`AnalysisReport`]:
//! - statistical notes for IC, chi-square and Englishness with a confidence band
//! - reasons supporting the winner
//! - up to three reasons why low-probability types were ruled out

use crate::models::{AnalysisReport, BasicStats, CipherType};
use serde::Serialize;

/// English IC used as the reference point for the IC note
const ENGLISH_IC_REFERENCE: f64 = 0.066;
/// Types below this probability (in percent) are listed as excluded
const EXCLUSION_PERCENT: u32 = 20;
const MAX_EXCLUSIONS: usize = 3;
/// Autocorrelation worth mentioning for a Vigenère winner
const STRONG_AUTOCORRELATION: f64 = 0.05;
/// Below this no periodicity is visible at all
const WEAK_AUTOCORRELATION: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    VeryStrong,
    Strong,
    Medium,
    Weak,
}

impl Strength {
    fn from_percent(percent: u32) -> Self {
        if percent > 70 {
            Strength::Strong
        } else if percent > 40 {
            Strength::Medium
        } else {
            Strength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::VeryStrong => "very strong",
            Strength::Strong => "strong",
            Strength::Medium => "medium",
            Strength::Weak => "weak",
        }
    }
}

/// One whole-text statistic with its reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatNote {
    pub metric: &'static str,
    pub value: String,
    pub analysis: &'static str,
    pub confidence: Confidence,
}

/// Something that points at the winner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
    pub evidence: &'static str,
    pub description: String,
    pub strength: Strength,
}

/// A low-probability type and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    pub cipher: CipherType,
    /// Rounded percentage
    pub probability: u32,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Explanation {
    /// Empty when basic statistics were not computed
    pub statistics: Vec<StatNote>,
    pub reasons: Vec<Reason>,
    pub exclusions: Vec<Exclusion>,
}

/// Build the explanation for a report
pub fn explain(report: &AnalysisReport) -> Explanation {
    Explanation {
        statistics: report.basic.as_ref().map(statistics).unwrap_or_default(),
        reasons: winner_reasons(report),
        exclusions: exclusions(report),
    }
}

fn statistics(basic: &BasicStats) -> Vec<StatNote> {
    vec![
        StatNote {
            metric: "Index of coincidence",
            value: format!("{:.4}", basic.index_of_coincidence),
            analysis: ic_analysis(basic.index_of_coincidence),
            confidence: ic_confidence(basic.index_of_coincidence),
        },
        StatNote {
            metric: "Chi-square",
            value: format!("{:.2}", basic.chi_square),
            analysis: chi_square_analysis(basic.chi_square),
            confidence: chi_square_confidence(basic.chi_square),
        },
        StatNote {
            metric: "Englishness",
            value: format!("{:.0}%", basic.englishness_percent),
            analysis: englishness_analysis(basic.englishness_percent),
            confidence: englishness_confidence(basic.englishness_percent),
        },
    ]
}

fn ic_analysis(ic: f64) -> &'static str {
    if ic > 0.06 {
        "Close to English (0.066); a monoalphabetic substitution is likely"
    } else if ic > 0.04 {
        "Below English; points to a polyalphabetic cipher or a transposition"
    } else {
        "Very low; heavy encipherment or non-English text"
    }
}

pub fn ic_confidence(ic: f64) -> Confidence {
    let distance = (ic - ENGLISH_IC_REFERENCE).abs();
    if distance < 0.01 {
        Confidence::High
    } else if distance < 0.02 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn chi_square_analysis(chi: f64) -> &'static str {
    if chi < 20.0 {
        "Letter frequencies match English closely; a monoalphabetic substitution is likely"
    } else if chi < 50.0 {
        "Letter frequencies are fairly close to English; a simple cipher is likely"
    } else if chi < 100.0 {
        "Letter frequencies drift from English; a more complex cipher is likely"
    } else {
        "Letter frequencies are far from English; a transposition or polyalphabetic cipher is possible"
    }
}

pub fn chi_square_confidence(chi: f64) -> Confidence {
    if chi < 30.0 {
        Confidence::High
    } else if chi < 70.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn englishness_analysis(percent: f64) -> &'static str {
    if percent > 80.0 {
        "Reads very much like English; a transposition is likely"
    } else if percent > 50.0 {
        "Somewhat English-like; partly decrypted or transposed"
    } else if percent > 20.0 {
        "Little English structure; a substitution is possible"
    } else {
        "Almost no English structure; a strong substitution or polyalphabetic cipher"
    }
}

pub fn englishness_confidence(percent: f64) -> Confidence {
    if percent > 70.0 {
        Confidence::High
    } else if percent > 40.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn percent(probability: f64) -> u32 {
    (probability * 100.0).round().clamp(0.0, 100.0) as u32
}

fn max_autocorrelation(report: &AnalysisReport) -> Option<(usize, f64)> {
    report
        .visual
        .autocorrelation
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i + 1, v)),
        })
}

fn winner_reasons(report: &AnalysisReport) -> Vec<Reason> {
    let winner = &report.winner;
    let prob = percent(winner.probability);
    let stats = &report.detector_stats;
    let even_length = report.length % 2 == 0;
    let mut reasons = Vec::new();

    match winner.cipher {
        CipherType::Caesar => {
            if let Some(shift) = stats.caesar_shift {
                reasons.push(Reason {
                    evidence: "Caesar fit",
                    description: format!("Shift {} gives the best frequency match", shift),
                    strength: Strength::from_percent(prob),
                });
            }
            if report.basic.as_ref().is_some_and(|b| b.chi_square < 30.0) {
                reasons.push(Reason {
                    evidence: "Letter frequencies",
                    description: "Frequencies match English after a single shift".to_string(),
                    strength: Strength::Strong,
                });
            }
        }
        CipherType::Affine => {
            if let Some(key) = stats.affine_key {
                reasons.push(Reason {
                    evidence: "Affine fit",
                    description: format!("Key {} gives the best decryption", key),
                    strength: Strength::from_percent(prob),
                });
            }
        }
        CipherType::Vigenere => {
            if let Some(length) = stats.vigenere_key_length {
                reasons.push(Reason {
                    evidence: "Periodicity",
                    description: format!("Period of key length {} detected", length),
                    strength: Strength::Strong,
                });
            }
            if let Some((lag, value)) = max_autocorrelation(report) {
                if value > STRONG_AUTOCORRELATION {
                    reasons.push(Reason {
                        evidence: "Autocorrelation peak",
                        description: format!("Strong self-match at lag {} ({:.3})", lag, value),
                        strength: Strength::Strong,
                    });
                }
            }
        }
        CipherType::Playfair => {
            reasons.push(Reason {
                evidence: "Playfair structure",
                description: "Even length, few doubled pairs and uneven use of X".to_string(),
                strength: if prob > 60 {
                    Strength::Strong
                } else {
                    Strength::Medium
                },
            });
            if even_length {
                reasons.push(Reason {
                    evidence: "Even length",
                    description: "Playfair ciphertext always has an even length".to_string(),
                    strength: Strength::Medium,
                });
            }
        }
        CipherType::Transposition => {
            if report
                .basic
                .as_ref()
                .is_some_and(|b| b.englishness_percent > 60.0)
            {
                reasons.push(Reason {
                    evidence: "High Englishness",
                    description: "Transposition keeps the original letter frequencies".to_string(),
                    strength: Strength::Strong,
                });
            }
        }
        CipherType::Adfgx => {
            reasons.push(Reason {
                evidence: "ADFGX alphabet",
                description: "The text uses only the letters ADFGX(V)".to_string(),
                strength: Strength::VeryStrong,
            });
            if even_length {
                reasons.push(Reason {
                    evidence: "Even length",
                    description: "ADFGX encodes coordinate pairs, so the length is even"
                        .to_string(),
                    strength: Strength::Strong,
                });
            }
        }
        CipherType::Substitution => {
            reasons.push(Reason {
                evidence: "Statistical match",
                description: format!("Matches with {}% probability over the other types", prob),
                strength: Strength::from_percent(prob),
            });
        }
    }
    reasons
}

fn exclusions(report: &AnalysisReport) -> Vec<Exclusion> {
    report
        .ranking()
        .into_iter()
        .skip(1)
        .filter_map(|(cipher, probability)| {
            let probability = percent(probability);
            (probability < EXCLUSION_PERCENT).then(|| Exclusion {
                cipher,
                probability,
                reason: exclusion_reason(cipher, report),
            })
        })
        .take(MAX_EXCLUSIONS)
        .collect()
}

fn exclusion_reason(cipher: CipherType, report: &AnalysisReport) -> &'static str {
    let basic = report.basic.as_ref();
    match cipher {
        CipherType::Caesar => {
            if basic.is_some_and(|b| b.chi_square > 50.0) {
                "Letter frequencies are far from English"
            } else {
                "Statistical features do not match"
            }
        }
        CipherType::Vigenere => match max_autocorrelation(report) {
            Some((_, value)) if value >= WEAK_AUTOCORRELATION => {
                "Key length search found no significant period"
            }
            _ => "No clear periodic pattern detected",
        },
        CipherType::Playfair => {
            if report.length % 2 != 0 {
                "Odd text length (Playfair is always even)"
            } else {
                "Characteristic digraph patterns are missing"
            }
        }
        CipherType::Adfgx => "The text is not limited to the letters ADFGX(V)",
        CipherType::Transposition => {
            if basic.is_some_and(|b| b.englishness_percent < 40.0) {
                "Englishness too low (transposition keeps English structure)"
            } else {
                "Statistical features do not match"
            }
        }
        CipherType::Substitution | CipherType::Affine => {
            "Another cipher type showed stronger features"
        }
    }
}
