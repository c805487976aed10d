//! Analyze command: read input, layer configuration, classify, report

use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use clairvoyance::config::{load_config_file, load_project_config, ProjectConfig};
use clairvoyance::reporters::{self, OutputFormat};
use clairvoyance::{AnalysisOptions, Analyzer, CipherType};

/// Arguments of the analyze subcommand plus the relevant globals
#[derive(Debug, Default)]
pub struct AnalyzeArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub disable: Vec<String>,
    pub temperature: Option<f64>,
    pub no_length_bias: bool,
    pub explain: bool,
    pub keep_non_letters: bool,
    pub workers: Option<usize>,
    pub config: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let options = build_options(&config, &args)?;
    let calibration = config.calibration();

    let format = match args.format.as_deref().or(config.defaults.format.as_deref()) {
        Some(name) => OutputFormat::from_str(name)?,
        None => OutputFormat::default(),
    };
    let explain = args.explain || config.defaults.explain.unwrap_or(false);
    let workers = args.workers.or(config.defaults.workers).unwrap_or(0);

    let input = read_input(args.text, args.file.as_deref())?;
    debug!("Read {} bytes of input", input.len());

    let report = Analyzer::new(options, calibration)
        .with_workers(workers)
        .analyze(&input)
        .context("Analysis failed")?;

    let rendered = reporters::report_with_format(&report, format, explain)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

/// Config file values first, then command-line flags
fn build_options(config: &ProjectConfig, args: &AnalyzeArgs) -> Result<AnalysisOptions> {
    let mut options = config.analysis_options();
    for name in &args.disable {
        let cipher = CipherType::from_str(name).map_err(|e| anyhow!(e))?;
        options.disable(cipher);
    }
    if let Some(temperature) = args.temperature {
        options.temperature = temperature;
    }
    if args.no_length_bias {
        options.length_bias = false;
    }
    if args.keep_non_letters {
        options.strip_non_letters = false;
    }
    Ok(options)
}

fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read ciphertext from stdin")?;
    Ok(buf)
}
