//! Clairvoyance - classical cipher classifier
//!
//! Takes a ciphertext sample, reduces it to its A-Z letter sequence and runs a
//! set of independent statistical detectors over it. Each detector produces an
//! evidence value for one cipher family; the aggregator turns those into a
//! probability ranking with a declared winner.
//!
//! ```no_run
//! use clairvoyance::{analyze, AnalysisOptions, CipherType};
//!
//! let report = analyze("KHOOR ZRUOG", &AnalysisOptions::default())?;
//! assert_eq!(report.winner.cipher, CipherType::Caesar);
//! # Ok::<(), clairvoyance::AnalysisError>(())
//! ```

pub mod config;
pub mod detectors;
pub mod error;
pub mod models;
pub mod periodicity;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
pub mod stats;
pub mod text;

pub use config::{AnalysisOptions, Calibration, ScoringConfig};
pub use error::{AnalysisError, DetectorError};
pub use models::{AnalysisReport, CipherType, Winner};
pub use pipeline::Analyzer;

/// Analyze `raw` with the given toggles and default calibration.
pub fn analyze(raw: &str, options: &AnalysisOptions) -> Result<AnalysisReport, AnalysisError> {
    Analyzer::new(options.clone(), Calibration::default()).analyze(raw)
}
