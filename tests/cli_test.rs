//! CLI contract tests
//!
//! Runs the built binary and checks input sources, output formats, exit
//! codes, detector toggles and config file layering.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn clairvoyance_bin() -> &'static str {
    env!("CARGO_BIN_EXE_clairvoyance")
}

/// Run in `dir` with optional stdin; returns (exit code, stdout, stderr)
fn run_in(dir: &Path, args: &[&str], stdin: Option<&str>) -> (i32, String, String) {
    let mut cmd = Command::new(clairvoyance_bin());
    cmd.args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("Failed to run clairvoyance");
    {
        let mut handle = child.stdin.take().expect("stdin");
        if let Some(input) = stdin {
            handle.write_all(input.as_bytes()).expect("write stdin");
        }
    }
    let output = child.wait_with_output().expect("wait for clairvoyance");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn run(args: &[&str]) -> (i32, String, String) {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), args, None)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Invalid JSON")
}

// ============================================================================
// Input and output
// ============================================================================

#[test]
fn test_analyze_text_argument_json() {
    let (code, stdout, _) = run(&["analyze", "KHOOR ZRUOG", "--format", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["winner"]["cipher"], "caesar");
    assert_eq!(v["detector_stats"]["caesar_shift"], 3);
    assert_eq!(v["length"], 10);
}

#[test]
fn test_analyze_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["analyze", "-f", "json"], Some("Khoor, Zruog!\n"));
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["winner"]["cipher"], "caesar");
}

#[test]
fn test_analyze_reads_file_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cipher.txt"), "KHOOR ZRUOG").unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &["analyze", "--file", "cipher.txt", "-f", "json", "-o", "out.json"],
        None,
    );
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert_eq!(parse_json(&written)["winner"]["cipher"], "caesar");
}

#[test]
fn test_text_output_default() {
    let (code, stdout, _) = run(&["analyze", "KHOOR ZRUOG"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Clairvoyance Analysis"));
    assert!(stdout.contains("Caesar shift: 3"));
}

#[test]
fn test_explain_flag() {
    let (code, stdout, _) = run(&["analyze", "KHOOR ZRUOG", "-f", "json", "--explain"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert!(v["explanation"]["reasons"].as_array().is_some_and(|r| !r.is_empty()));
}

#[test]
fn test_keep_non_letters() {
    let (_, stdout, _) = run(&["analyze", "Khoor, zruog!", "-f", "json", "--keep-non-letters"]);
    let v = parse_json(&stdout);
    assert_eq!(v["display_text"], "KHOOR, ZRUOG!");
    assert_eq!(v["text"], "KHOORZRUOG");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_empty_input_exits_1() {
    let (code, stdout, stderr) = run(&["analyze", "123 !!"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no letters to analyze"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_detector_exits_1() {
    let (code, _, stderr) = run(&["analyze", "ABC", "--disable", "enigma"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("enigma"));
}

#[test]
fn test_invalid_workers_rejected() {
    let (code, _, _) = run(&["--workers", "0", "analyze", "ABC"]);
    assert_ne!(code, 0);
}

// ============================================================================
// Toggles and configuration
// ============================================================================

#[test]
fn test_disable_removes_cipher() {
    let (code, stdout, _) = run(&[
        "analyze",
        "KHOOR ZRUOG",
        "-f",
        "json",
        "--disable",
        "caesar",
        "--disable",
        "playfair",
    ]);
    assert_eq!(code, 0);
    let probs = parse_json(&stdout)["probabilities"].clone();
    let probs = probs.as_object().unwrap();
    assert!(!probs.contains_key("caesar"));
    assert!(!probs.contains_key("affine"));
    assert!(!probs.contains_key("playfair"));
    assert!(probs.contains_key("vigenere"));
}

#[test]
fn test_project_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("clairvoyance.toml"),
        "[detectors]\nadfgx = false\n\n[defaults]\nformat = \"json\"\n",
    )
    .unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["analyze", "KHOOR ZRUOG"], None);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert!(v["probabilities"].get("adfgx").is_none());
}

#[test]
fn test_explicit_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[scoring]\nlength_bias = false\n").unwrap();
    let config_arg = config.to_string_lossy().to_string();

    let (_, with_bias, _) = run(&["analyze", "KHOOR ZRUOG", "-f", "json"]);
    let (code, without_bias, _) =
        run(&["--config", &config_arg, "analyze", "KHOOR ZRUOG", "-f", "json"]);
    assert_eq!(code, 0);
    let biased = parse_json(&with_bias);
    let unbiased = parse_json(&without_bias);
    assert_eq!(unbiased["evidence"]["caesar"], unbiased["raw_evidence"]["caesar"]);
    assert_ne!(biased["evidence"]["caesar"], biased["raw_evidence"]["caesar"]);
}

#[test]
fn test_broken_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "[scoring\ntemperature = ").unwrap();
    let config_arg = config.to_string_lossy().to_string();
    let (code, _, stderr) = run(&["--config", &config_arg, "analyze", "ABC"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid config file"));
}

#[test]
fn test_init_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(dir.path(), &["init"], None);
    assert_eq!(code, 0);
    assert!(dir.path().join("clairvoyance.toml").exists());
    let (code, stdout, _) = run_in(dir.path(), &["analyze", "KHOOR ZRUOG"], None);
    assert_eq!(code, 0);
    assert!(stdout.contains("Caesar"));
}

#[test]
fn test_detectors_lists_all() {
    let (code, stdout, _) = run(&["detectors"]);
    assert_eq!(code, 0);
    for id in [
        "substitution",
        "caesar",
        "affine",
        "vigenere",
        "playfair",
        "transposition",
        "adfgx",
    ] {
        assert!(stdout.contains(id), "missing {}", id);
    }
}
