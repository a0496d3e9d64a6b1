//! Error reporting for bad input and unknown names.

use clap::Parser;
use costar_cli::{Cli, run};
use costar_core::Error;
use tempfile::TempDir;

fn setup() -> (TempDir, String, String) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();
    let data = dir.path().join("credits.csv");
    std::fs::write(&data, "episode,character\n1,Rose\n1,Doctor\n").unwrap();
    (
        dir,
        config.display().to_string(),
        data.display().to_string(),
    )
}

fn run_args(args: &[&str]) -> Result<String, Error> {
    let cli = Cli::try_parse_from(std::iter::once("costar").chain(args.iter().copied())).unwrap();
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_missing_dataset_is_not_found() {
    let (dir, config, _) = setup();
    let missing = dir.path().join("nope.csv").display().to_string();
    let err = run_args(&["summary", "--config", &config, "--data", &missing]).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_no_dataset_configured() {
    let (_dir, config, _) = setup();
    let err = run_args(&["summary", "--config", &config]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("--data"));
}

#[test]
fn test_explicit_missing_config_is_error() {
    let (dir, _, data) = setup();
    let missing = dir.path().join("absent.toml").display().to_string();
    let err = run_args(&["summary", "--config", &missing, "--data", &data]).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_invalid_config_is_config_error() {
    let (_dir, config, data) = setup();
    std::fs::write(&config, "[report\ntop = ").unwrap();
    let err = run_args(&["summary", "--config", &config, "--data", &data]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_unknown_character_in_arc() {
    let (_dir, config, data) = setup();
    let err = run_args(&["arc", "Martha", "--config", &config, "--data", &data]).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "character not found: Martha");
}

#[test]
fn test_unknown_character_in_pair_and_pairs() {
    let (_dir, config, data) = setup();
    let pair = run_args(&["pair", "Rose", "Martha", "--config", &config, "--data", &data]);
    assert!(pair.unwrap_err().is_not_found());

    let pairs = run_args(&[
        "pairs",
        "--character",
        "Martha",
        "--config",
        &config,
        "--data",
        &data,
    ]);
    assert!(pairs.unwrap_err().is_not_found());
}

#[test]
fn test_long_layout_missing_column() {
    let (dir, config, _) = setup();
    let data = dir.path().join("bad.csv");
    std::fs::write(&data, "episode,who\n1,Rose\n").unwrap();
    let data = data.display().to_string();

    let err = run_args(&[
        "summary", "--config", &config, "--data", &data, "--layout", "long",
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("character"));
}

#[test]
fn test_bad_delimiter_in_config() {
    let (_dir, config, data) = setup();
    std::fs::write(&config, "[dataset]\ndelimiter = \"::\"\n").unwrap();
    let err = run_args(&["summary", "--config", &config, "--data", &data]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_empty_file_gives_empty_summary() {
    let (dir, config, _) = setup();
    let data = dir.path().join("empty.csv");
    std::fs::write(&data, "").unwrap();
    let data = data.display().to_string();

    let out = run_args(&["summary", "--config", &config, "--data", &data, "-o", "json"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["dataset"]["episodes"], 0);
    assert_eq!(json["top_characters"], serde_json::json!([]));
}
