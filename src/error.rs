//! Error types for the analysis library
//!
//! Only two things can stop an analysis outright: input with nothing to
//! analyze and a calibration that cannot be used. Everything a single
//! detector does wrong is a [`DetectorError`], which the engine absorbs.

use thiserror::Error;

/// Errors that abort an analysis call
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input contained no A-Z letters after normalization
    #[error("no letters to analyze: input contains no A-Z characters")]
    EmptyInput,

    /// A calibration constant is out of its valid range
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Every detector was disabled, so there is nothing to rank
    #[error("no detectors enabled: enable at least one detector")]
    NoDetectors,

    /// The detector engine could not be started
    #[error("detector engine failed: {0}")]
    Engine(String),
}

/// Errors raised by a single detector
///
/// These never escape the engine. The failing detector's cipher type gets a
/// fallback evidence value and is listed as degraded in the report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    #[error("{detector} produced a non-finite {what}")]
    NonFinite {
        detector: &'static str,
        what: &'static str,
    },

    #[error("{detector} failed: {reason}")]
    Internal {
        detector: &'static str,
        reason: String,
    },
}

impl DetectorError {
    /// Name of the detector that raised the error
    pub fn detector(&self) -> &'static str {
        match self {
            DetectorError::NonFinite { detector, .. } => detector,
            DetectorError::Internal { detector, .. } => detector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message_is_not_empty() {
        let msg = AnalysisError::EmptyInput.to_string();
        assert!(!msg.is_empty());
        assert!(msg.contains("A-Z"));
    }

    #[test]
    fn test_detector_error_display() {
        let err = DetectorError::NonFinite {
            detector: "caesar",
            what: "evidence",
        };
        assert_eq!(err.to_string(), "caesar produced a non-finite evidence");
        assert_eq!(err.detector(), "caesar");
    }
}
