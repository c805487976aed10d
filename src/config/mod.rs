//! Configuration module for Clairvoyance
//!
//! This module handles:
//! - Per-call analysis toggles (`AnalysisOptions`)
//! - Heuristic constants of every detector (`Calibration`)
//! - Project/user configuration files (`clairvoyance.toml`)
//! - CLI defaults

mod calibration;
mod options;
mod project_config;

pub use calibration::{
    AdfgxCalibration, AffineCalibration, BiasFactors, CaesarCalibration, Calibration,
    LengthBiasCalibration, PeriodicityCalibration, PlayfairCalibration,
    SubstitutionCalibration, TranspositionCalibration, VigenereCalibration,
};
pub use options::AnalysisOptions;
pub use project_config::{
    load_config_file, load_project_config, user_config_path, CliDefaults, DetectorToggles,
    ProjectConfig, ScoringConfig, CONFIG_FILE_NAME, EXAMPLE_CONFIG,
};
