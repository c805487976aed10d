//! ADFGX / ADFGVX alphabet restriction
//!
//! The fractionating step writes every letter as a pair of coordinates
//! drawn from ADFGX (5x5 square) or ADFGVX (6x6), so the ciphertext uses
//! only those letters and always has even length.

use super::base::{AnalysisContext, Detector, DetectorDetails, DetectorResult};
use crate::config::AdfgxCalibration;
use crate::error::DetectorError;
use crate::models::CipherType;
use serde::Serialize;
use std::fmt;

const ADFGX: &[u8] = b"ADFGX";
const ADFGVX: &[u8] = b"ADFGVX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdfgxVariant {
    #[serde(rename = "ADFGX")]
    Adfgx,
    #[serde(rename = "ADFGVX")]
    Adfgvx,
}

impl fmt::Display for AdfgxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdfgxVariant::Adfgx => write!(f, "ADFGX"),
            AdfgxVariant::Adfgvx => write!(f, "ADFGVX"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfgxMatch {
    pub variant: Option<AdfgxVariant>,
    pub even_length: bool,
}

/// Which alphabet, if any, the text is restricted to
pub fn classify_alphabet(text: &[u8]) -> Option<AdfgxVariant> {
    if text.iter().all(|c| ADFGX.contains(c)) {
        Some(AdfgxVariant::Adfgx)
    } else if text.iter().all(|c| ADFGVX.contains(c)) {
        Some(AdfgxVariant::Adfgvx)
    } else {
        None
    }
}

pub struct AdfgxDetector {
    calibration: AdfgxCalibration,
}

impl AdfgxDetector {
    pub fn new(calibration: AdfgxCalibration) -> Self {
        Self { calibration }
    }
}

impl Default for AdfgxDetector {
    fn default() -> Self {
        Self::new(AdfgxCalibration::default())
    }
}

impl Detector for AdfgxDetector {
    fn name(&self) -> &'static str {
        "adfgx"
    }

    fn cipher(&self) -> CipherType {
        CipherType::Adfgx
    }

    fn description(&self) -> &'static str {
        "Even-length text over the ADFGX or ADFGVX alphabet"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<DetectorResult, DetectorError> {
        let even_length = ctx.len() % 2 == 0;
        let variant = if even_length {
            classify_alphabet(ctx.bytes())
        } else {
            None
        };
        let evidence = match variant {
            Some(AdfgxVariant::Adfgx) => self.calibration.adfgx_evidence,
            Some(AdfgxVariant::Adfgvx) => self.calibration.adfgvx_evidence,
            None => 0.0,
        };
        DetectorResult::checked(
            self.name(),
            self.cipher(),
            evidence,
            ctx.max_evidence,
            DetectorDetails::Adfgx(AdfgxMatch {
                variant,
                even_length,
            }),
        )
    }
}
