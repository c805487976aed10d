//! Project-level configuration support
//!
//! Loads configuration from `clairvoyance.toml` in the working directory,
//! falling back to `~/.config/clairvoyance/config.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! [detectors]
//! playfair = false
//!
//! [scoring]
//! temperature = 0.5
//! length_bias = true
//!
//! [calibration.caesar]
//! chi_threshold = 420.0
//!
//! [defaults]
//! format = "json"
//! workers = 4
//! ```

use super::{AnalysisOptions, Calibration};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "clairvoyance.toml";

/// Written by `clairvoyance init`
pub const EXAMPLE_CONFIG: &str = r#"# Clairvoyance configuration
#
# Every key is optional; missing keys keep their defaults.

[detectors]
# Whole-text statistics and the unclassified-substitution detector
basic = true
caesar_affine = true
# Vigenère key length search (Kasiski + autocorrelation)
vig_auto_kasiski = true
# Vigenère per-column IC / chi-square analysis
vig_columns = true
playfair = true
transposition = true
adfgx = true
# Show letters only (false keeps punctuation in the displayed text)
strip_non_letters = true

[scoring]
# Softmax temperature; lower values sharpen the ranking
temperature = 0.7
# Favour monoalphabetic ciphers on very short texts
length_bias = true
# Evidence given to a detector that fails
fallback_evidence = 0.05

[calibration.periodicity]
# Search repeats up to 7 letters and weight long repeats double
enhanced_kasiski = false
max_distances = 1500

[calibration.caesar]
chi_threshold = 400.0

[defaults]
# Default output format (text, json)
format = "text"
# workers = 4
"#;

/// Configuration loaded from `clairvoyance.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Detector toggles
    #[serde(default)]
    pub detectors: DetectorToggles,

    /// Evidence aggregation settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Detector constants
    #[serde(default)]
    pub calibration: Calibration,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Toggle overrides; unset entries keep the option defaults
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DetectorToggles {
    #[serde(default)]
    pub strip_non_letters: Option<bool>,
    #[serde(default)]
    pub basic: Option<bool>,
    #[serde(default)]
    pub caesar_affine: Option<bool>,
    #[serde(default)]
    pub vig_auto_kasiski: Option<bool>,
    #[serde(default)]
    pub vig_columns: Option<bool>,
    #[serde(default)]
    pub playfair: Option<bool>,
    #[serde(default)]
    pub transposition: Option<bool>,
    #[serde(default)]
    pub adfgx: Option<bool>,
}

impl DetectorToggles {
    fn apply(&self, options: &mut AnalysisOptions) {
        let pairs = [
            (self.strip_non_letters, &mut options.strip_non_letters),
            (self.basic, &mut options.basic),
            (self.caesar_affine, &mut options.caesar_affine),
            (self.vig_auto_kasiski, &mut options.vig_auto_kasiski),
            (self.vig_columns, &mut options.vig_columns),
            (self.playfair, &mut options.playfair),
            (self.transposition, &mut options.transposition),
            (self.adfgx, &mut options.adfgx),
        ];
        for (value, slot) in pairs {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

/// Evidence aggregation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Softmax temperature (default: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Length bias adjustment (default: true)
    #[serde(default = "default_length_bias")]
    pub length_bias: bool,

    /// Evidence for a failed detector; overrides `calibration.fallback_evidence`
    #[serde(default)]
    pub fallback_evidence: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            length_bias: default_length_bias(),
            fallback_evidence: None,
        }
    }
}

fn default_temperature() -> f64 {
    crate::stats::DEFAULT_TEMPERATURE
}

fn default_length_bias() -> bool {
    true
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default number of workers
    #[serde(default)]
    pub workers: Option<usize>,

    /// Append the explanation to text output
    #[serde(default)]
    pub explain: Option<bool>,
}

impl ProjectConfig {
    /// Analysis options with the file's toggles and scoring applied
    pub fn analysis_options(&self) -> AnalysisOptions {
        let mut options = AnalysisOptions {
            temperature: self.scoring.temperature,
            length_bias: self.scoring.length_bias,
            ..Default::default()
        };
        self.detectors.apply(&mut options);
        options
    }

    /// Calibration with the `[scoring]` overrides folded in
    pub fn calibration(&self) -> Calibration {
        let mut calibration = self.calibration.clone();
        if let Some(fallback) = self.scoring.fallback_evidence {
            calibration.fallback_evidence = fallback;
        }
        calibration
    }
}

/// Path of the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("clairvoyance").join("config.toml"))
}

/// Load configuration for `dir`.
///
/// Searches for configuration files in this order:
/// 1. `<dir>/clairvoyance.toml`
/// 2. `~/.config/clairvoyance/config.toml`
///
/// Returns default configuration if no file is found. A file that fails
/// to parse is skipped with a warning.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let candidates = std::iter::once(dir.join(CONFIG_FILE_NAME)).chain(user_config_path());
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit TOML file
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}
