//! Integration tests for the `config` subcommands.

use crate::common::{TestHarness, long_dataset};

#[test]
fn test_config_path_prints_explicit_path() {
    let harness = TestHarness::new();
    let out = harness.run(&["config", "path"]);
    assert_eq!(out.trim_end(), harness.config.display().to_string());
}

#[test]
fn test_config_get_default_value() {
    let harness = TestHarness::new();
    assert_eq!(harness.run(&["config", "get", "report.top"]), "10\n");
    assert_eq!(harness.run(&["config", "get", "dataset.layout"]), "auto\n");
}

#[test]
fn test_config_set_changes_reports() {
    let (harness, data) = long_dataset();
    harness.run(&["config", "set", "report.top", "2"]);

    assert_eq!(harness.run(&["config", "get", "report.top"]), "2\n");
    let json = harness.run_json(&["appearances", "--data", &data]);
    assert_eq!(json["characters"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_set_rejects_wrong_type() {
    let harness = TestHarness::new();
    let err = harness
        .try_run(&["config", "set", "report.top", "many"])
        .unwrap_err();
    assert!(err.to_string().contains("Invalid value for 'report.top'"));
    assert_eq!(harness.run(&["config", "get", "report.top"]), "10\n");
}

#[test]
fn test_config_init_writes_defaults() {
    let harness = TestHarness::new();
    let target = harness.path("nested/costar.toml");
    let target_str = target.display().to_string();

    let out = harness.run(&["config", "init", "--file", &target_str]);
    assert!(out.starts_with("Config file created at"));
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("[report]"));

    assert!(
        harness
            .try_run(&["config", "init", "--file", &target_str])
            .is_err()
    );
    harness.run(&["config", "init", "--file", &target_str, "--force"]);
}

#[test]
fn test_config_export() {
    let harness = TestHarness::new();
    let out = harness.run(&["config", "export"]);
    assert!(out.contains("COSTAR_REPORT_TOP=10\n"));
    assert!(out.contains("COSTAR_DATASET_LAYOUT=auto\n"));
}
