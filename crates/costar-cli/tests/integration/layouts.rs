//! Integration tests for layout detection and dataset options.

use crate::common::{LONG_CSV, TestHarness, long_dataset, wide_dataset};

#[test]
fn test_wide_layout_is_detected() {
    let (harness, data) = wide_dataset();
    let json = harness.run_json(&["summary", "--data", &data]);

    assert_eq!(json["dataset"]["layout"], "wide");
    assert_eq!(json["dataset"]["episodes"], 4);
    assert_eq!(json["dataset"]["credits"], 7);
}

#[test]
fn test_wide_and_long_agree() {
    let (long, long_data) = long_dataset();
    let (wide, wide_data) = wide_dataset();

    for command in ["pairs", "appearances", "connections"] {
        let from_long = long.run_json(&[command, "--data", &long_data]);
        let from_wide = wide.run_json(&[command, "--data", &wide_data]);
        assert_eq!(from_long, from_wide, "{command} differs between layouts");
    }
}

#[test]
fn test_wide_arc_includes_empty_episode() {
    let (harness, data) = wide_dataset();
    let out = harness.run(&["arc", "Doctor", "--data", &data]);
    assert_eq!(out, "Doctor: 2 of 4 episodes (first 1, last 3)\n  1  #.#.\n");
}

#[test]
fn test_wide_plot_groups_count_empty_episodes() {
    let (harness, data) = wide_dataset();
    let json = harness.run_json(&["plots", "--data", &data]);
    assert_eq!(json["plots"][1]["plot"], "2");
    assert_eq!(json["plots"][1]["episodes"], 2);
}

#[test]
fn test_forced_layout_overrides_detection() {
    let (harness, data) = long_dataset();
    // Read as wide, the long file has episodes named "character" and "plot".
    let json = harness.run_json(&["summary", "--data", &data, "--layout", "wide"]);
    assert_eq!(json["dataset"]["layout"], "wide");
    assert_eq!(json["dataset"]["episodes"], 2);
}

#[test]
fn test_custom_columns_and_delimiter_from_config() {
    let harness = TestHarness::new();
    let data = harness.write(
        "credits.tsv",
        "ep\tname\n1\tRose\n1\tDoctor\n2\tRose\n",
    );
    harness.set_config(
        "[dataset]\ndelimiter = \"tab\"\nepisode_column = \"ep\"\ncharacter_column = \"name\"\n",
    );

    let data = data.display().to_string();
    let json = harness.run_json(&["pair", "Rose", "Doctor", "--data", &data]);
    assert_eq!(json["shared"], 1);
    assert_eq!(json["appearances_a"], 2);
}

#[test]
fn test_dataset_path_from_config() {
    let harness = TestHarness::new();
    let data = harness.write("credits.csv", LONG_CSV);
    harness.set_config(&format!("[dataset]\npath = {:?}\n", data.display().to_string()));

    let json = harness.run_json(&["appearances"]);
    assert_eq!(json["characters"][0]["character"], "Rose");
}

#[test]
fn test_malformed_rows_are_skipped() {
    let harness = TestHarness::new();
    let data = harness.write(
        "credits.csv",
        "episode,character\n1,Rose\n,Doctor\n2,\n2,Rose\n",
    );
    let data = data.display().to_string();

    let json = harness.run_json(&["summary", "--data", &data]);
    assert_eq!(json["dataset"]["skipped_rows"], 2);
    assert_eq!(json["dataset"]["credits"], 2);
    assert_eq!(json["top_characters"][0]["appearances"], 2);
}
