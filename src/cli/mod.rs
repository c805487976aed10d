//! CLI command definitions and handlers

mod analyze;
mod detectors;
mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Clairvoyance - classical cipher classifier
#[derive(Parser, Debug)]
#[command(name = "clairvoyance")]
#[command(
    version,
    about = "Classify classical ciphertext: Caesar, Affine, Vigenère, Playfair, transposition, ADFGX",
    long_about = "Clairvoyance reduces a ciphertext to its A-Z letters, runs independent \
statistical detectors over it (frequency fit, index of coincidence, Kasiski and \
autocorrelation periodicity, digraph structure, restricted alphabets) and turns their \
evidence into a probability ranking with a declared winner.",
    after_help = "\
Examples:
  clairvoyance analyze \"KHOOR ZRUOG\"              Classify a short text
  clairvoyance analyze --file cipher.txt --explain  Classify a file with reasons
  cat cipher.txt | clairvoyance analyze -f json     JSON output for scripting
  clairvoyance analyze --disable playfair TEXT      Skip a detector
  clairvoyance detectors                            List detectors
  clairvoyance init                                 Write an example clairvoyance.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel detector workers (1-64, default: auto)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Configuration file (default: ./clairvoyance.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a ciphertext sample
    #[command(after_help = "\
Input is TEXT, the contents of --file, or stdin when neither is given.
Only the letters A-Z are analyzed; everything else is stripped.

Detectors: substitution, caesar, affine, vigenere, playfair, transposition, adfgx
(caesar and affine share one toggle)")]
    Analyze {
        /// Ciphertext to analyze
        text: Option<String>,

        /// Read the ciphertext from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format: text, json (default: text, or the config default)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Disable a detector (repeatable)
        #[arg(long, value_name = "DETECTOR")]
        disable: Vec<String>,

        /// Softmax temperature (default: 0.7)
        #[arg(long)]
        temperature: Option<f64>,

        /// Do not adjust evidence for short texts
        #[arg(long)]
        no_length_bias: bool,

        /// Explain the classification
        #[arg(long)]
        explain: bool,

        /// Show the uppercased input with punctuation instead of letters only
        #[arg(long)]
        keep_non_letters: bool,
    },

    /// List the available detectors
    Detectors,

    /// Write an example clairvoyance.toml config file
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            text,
            file,
            format,
            output,
            disable,
            temperature,
            no_length_bias,
            explain,
            keep_non_letters,
        } => analyze::run(analyze::AnalyzeArgs {
            text,
            file,
            format,
            output,
            disable,
            temperature,
            no_length_bias,
            explain,
            keep_non_letters,
            workers: cli.workers,
            config: cli.config,
        }),
        Commands::Detectors => detectors::run(cli.config.as_deref()),
        Commands::Init { path, force } => init::run(&path, force),
    }
}
