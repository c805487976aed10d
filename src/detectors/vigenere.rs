//! Vigenère detector
//!
//! Candidate key lengths come from the periodicity ranker (or every length
//! in the configured range when the Kasiski search is off). For each
//! length the text is split into columns, one per key letter; the right
//! length turns every column into a Caesar-shifted English sample:
//!
//! - column ICs close to English and to each other
//! - each column has a good Caesar fit
//! - the periodicity signals agree
//!
//! The winning length must also *lift* the IC: columns of a monoalphabetic
//! text look as English as the whole text, so no lift means no Vigenère.

use super::base::{preview, AnalysisContext, Detector, DetectorDetails, DetectorResult};
use super::caesar::best_caesar_shift_chi2;
use crate::config::{PeriodicityCalibration, VigenereCalibration};
use crate::error::DetectorError;
use crate::models::CipherType;
use crate::periodicity::{GcdHistogram, KeyLengthCandidate};
use crate::stats::{clamp01, friedman_expected_ic, index_of_coincidence, mean, std_dev};
use serde::Serialize;
use tracing::debug;

/// Scores for one candidate key length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub key_length: usize,
    pub composite: f64,
    pub ic_mean: f64,
    pub ic_std: f64,
    pub ic_score: f64,
    pub chi_mean: f64,
    pub chi_score: f64,
    pub periodicity: f64,
    pub consistency: f64,
    #[serde(skip)]
    shifts: Vec<u8>,
    #[serde(skip)]
    column_ics: Vec<f64>,
}

/// Everything the Vigenère search produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VigenereAnalysis {
    pub key_length: usize,
    /// Per-column Caesar shifts; empty when column analysis is off
    pub shifts: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub column_ics: Vec<f64>,
    pub candidates: Vec<CandidateRecord>,
    pub ranked_lengths: Vec<KeyLengthCandidate>,
    pub autocorrelation: Vec<f64>,
    pub gcd_histogram: GcdHistogram,
    /// Lift of the mean column IC over the whole-text IC
    pub ic_lift: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Split into `k` columns: column j holds letters j, j+k, j+2k, ...
pub fn split_columns(text: &[u8], k: usize) -> Vec<Vec<u8>> {
    let mut columns = vec![Vec::with_capacity(text.len() / k + 1); k];
    for (i, &c) in text.iter().enumerate() {
        columns[i % k].push(c);
    }
    columns
}

/// Subtract the repeating key shifts
pub fn vigenere_decrypt(text: &[u8], shifts: &[u8]) -> Vec<u8> {
    if shifts.is_empty() {
        return text.to_vec();
    }
    text.iter()
        .enumerate()
        .map(|(i, &c)| b'A' + ((c - b'A') + 26 - shifts[i % shifts.len()] % 26) % 26)
        .collect()
}

pub struct VigenereDetector {
    calibration: VigenereCalibration,
    periodicity: PeriodicityCalibration,
    use_kasiski: bool,
    use_columns: bool,
}

impl VigenereDetector {
    pub fn new(
        calibration: VigenereCalibration,
        periodicity: PeriodicityCalibration,
        use_kasiski: bool,
        use_columns: bool,
    ) -> Self {
        Self {
            calibration,
            periodicity,
            use_kasiski,
            use_columns,
        }
    }

    fn candidate_lengths(&self, ctx: &AnalysisContext<'_>) -> Vec<usize> {
        let ranked: Vec<usize> = if self.use_kasiski {
            ctx.periodicity.candidates.iter().map(|c| c.length).collect()
        } else {
            Vec::new()
        };
        let lengths = if ranked.is_empty() {
            (self.periodicity.min_key_length..=self.periodicity.max_key_length).collect()
        } else {
            ranked
        };
        let n = ctx.len();
        lengths.into_iter().filter(|&k| n >= 2 * k).collect()
    }

    /// Agreement of autocorrelation and Kasiski with length `k`
    fn periodicity_term(&self, ctx: &AnalysisContext<'_>, k: usize) -> f64 {
        if !self.use_kasiski {
            return self.calibration.neutral_periodicity;
        }
        let ac = ctx.periodicity.ac(k);
        let ac_term = clamp01((ac - self.periodicity.ac_baseline) / self.calibration.ac_range);
        let hist = &ctx.periodicity.gcd_histogram;
        let max_hist = hist.max_count();
        let gcd_term = if max_hist > 0.0 {
            clamp01(hist.get(k) / max_hist)
        } else {
            0.0
        };
        0.6 * ac_term + 0.4 * gcd_term
    }

    fn score_length(&self, ctx: &AnalysisContext<'_>, k: usize) -> CandidateRecord {
        let cal = &self.calibration;
        let columns = split_columns(ctx.bytes(), k);
        let column_ics: Vec<f64> = columns.iter().map(|c| index_of_coincidence(c)).collect();
        let fits: Vec<(u8, f64)> = columns.iter().map(|c| best_caesar_shift_chi2(c)).collect();
        let chis: Vec<f64> = fits.iter().map(|(_, chi)| *chi).collect();

        let ic_mean = mean(&column_ics);
        let ic_std = std_dev(&column_ics);
        let chi_mean = mean(&chis);

        let ic_score =
            clamp01(1.0 - (ic_mean - cal.column_ic_target).abs() / cal.column_ic_tolerance);
        let chi_score = clamp01((cal.chi_threshold - chi_mean) / cal.chi_threshold);
        let periodicity = self.periodicity_term(ctx, k);
        let consistency = clamp01(1.0 - ic_std / cal.consistency_tolerance);
        let composite = cal.ic_weight * ic_score
            + cal.chi_weight * chi_score
            + cal.periodicity_weight * periodicity
            + cal.consistency_weight * consistency;

        debug!(
            "vigenere k={}: ic {:.4} chi {:.1} per {:.2} cons {:.2} -> {:.3}",
            k, ic_mean, chi_mean, periodicity, consistency, composite
        );
        CandidateRecord {
            key_length: k,
            composite,
            ic_mean,
            ic_std,
            ic_score,
            chi_mean,
            chi_score,
            periodicity,
            consistency,
            shifts: fits.iter().map(|(s, _)| *s).collect(),
            column_ics,
        }
    }

    /// Best record, folded onto its smallest close-scoring divisor
    fn select<'r>(&self, records: &'r [CandidateRecord]) -> Option<&'r CandidateRecord> {
        let cal = &self.calibration;
        let best = records.iter().fold(None, |best: Option<&CandidateRecord>, r| match best {
            Some(b) if b.composite >= r.composite => best,
            _ => Some(r),
        })?;
        let divisor = records
            .iter()
            .filter(|r| {
                r.key_length < best.key_length
                    && best.key_length % r.key_length == 0
                    && r.composite >= best.composite - cal.divisor_margin
                    && r.ic_score >= cal.divisor_ic_ratio * best.ic_score
            })
            .min_by_key(|r| r.key_length);
        Some(divisor.unwrap_or(best))
    }

    fn column_evidence(&self, ctx: &AnalysisContext<'_>, best: &CandidateRecord) -> (f64, f64) {
        let cal = &self.calibration;
        let lift = best.ic_mean - ctx.ic;
        let lift_factor = cal.lift_floor + (1.0 - cal.lift_floor) * clamp01(lift / cal.lift_scale);
        let mut evidence = best.composite * cal.evidence_gain * lift_factor;

        if ctx.periodicity.gcd_histogram.peak() == Some(best.key_length) {
            evidence *= cal.gcd_peak_bonus;
        }
        if (ctx.ic - friedman_expected_ic(best.key_length)).abs() <= cal.friedman_tolerance {
            evidence *= cal.friedman_bonus;
        }
        (clamp01(evidence) * ctx.coverage, lift)
    }

    fn analysis(
        &self,
        ctx: &AnalysisContext<'_>,
        best: &CandidateRecord,
        records: Vec<CandidateRecord>,
        ic_lift: f64,
    ) -> VigenereAnalysis {
        let (shifts, key, preview_text) = if self.use_columns {
            let key: String = best.shifts.iter().map(|s| (b'A' + s) as char).collect();
            let plain = vigenere_decrypt(ctx.bytes(), &best.shifts);
            (best.shifts.clone(), Some(key), Some(preview(&plain)))
        } else {
            (Vec::new(), None, None)
        };
        VigenereAnalysis {
            key_length: best.key_length,
            shifts,
            key,
            column_ics: best.column_ics.clone(),
            candidates: records,
            ranked_lengths: ctx.periodicity.candidates.clone(),
            autocorrelation: ctx.periodicity.autocorrelation.clone(),
            gcd_histogram: ctx.periodicity.gcd_histogram.clone(),
            ic_lift,
            preview: preview_text,
        }
    }
}

impl Default for VigenereDetector {
    fn default() -> Self {
        Self::new(
            VigenereCalibration::default(),
            PeriodicityCalibration::default(),
            true,
            true,
        )
    }
}

impl Detector for VigenereDetector {
    fn name(&self) -> &'static str {
        "vigenere"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Vigenere
    }

    fn description(&self) -> &'static str {
        "Key length search (Kasiski, autocorrelation) with per-column IC and Caesar fits"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let cal = &self.calibration;
        if !self.use_kasiski && !self.use_columns {
            return Ok(DetectorResult::skipped(
                self.cipher(),
                "key length search and column analysis disabled",
            ));
        }
        if ctx.len() < cal.min_length {
            return Ok(DetectorResult::skipped(
                self.cipher(),
                format!("needs at least {} letters", cal.min_length),
            ));
        }

        let lengths = self.candidate_lengths(ctx);
        if lengths.is_empty() {
            return Ok(DetectorResult::skipped(
                self.cipher(),
                "text too short for any key length",
            ));
        }

        let (evidence, analysis) = if self.use_columns {
            let records: Vec<CandidateRecord> =
                lengths.iter().map(|&k| self.score_length(ctx, k)).collect();
            let best = self
                .select(&records)
                .cloned()
                .ok_or_else(|| DetectorError::Internal {
                    detector: self.name(),
                    reason: "no candidate record".to_string(),
                })?;
            let (evidence, lift) = self.column_evidence(ctx, &best);
            (evidence, self.analysis(ctx, &best, records, lift))
        } else {
            // Periodicity alone, gated on the whole-text IC looking polyalphabetic
            let (k, per) = lengths
                .iter()
                .map(|&k| (k, self.periodicity_term(ctx, k)))
                .fold((0, f64::NEG_INFINITY), |best, cur| {
                    if cur.1 > best.1 {
                        cur
                    } else {
                        best
                    }
                });
            let gate = if ctx.ic < cal.polyalphabetic_ic {
                1.0
            } else {
                cal.monoalphabetic_gate
            };
            let evidence = clamp01(per * cal.periodicity_only_gain) * gate * ctx.coverage;
            let best = CandidateRecord {
                key_length: k,
                composite: per,
                ic_mean: 0.0,
                ic_std: 0.0,
                ic_score: 0.0,
                chi_mean: 0.0,
                chi_score: 0.0,
                periodicity: per,
                consistency: 0.0,
                shifts: Vec::new(),
                column_ics: Vec::new(),
            };
            (evidence, self.analysis(ctx, &best, Vec::new(), 0.0))
        };

        debug!(
            "vigenere: key length {} key {:?} evidence {:.3}",
            analysis.key_length, analysis.key, evidence
        );
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Vigenere(Box::new(analysis)),
        )
    }
}
