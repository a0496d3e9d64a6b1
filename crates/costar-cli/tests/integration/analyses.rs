//! Integration tests for the analysis commands on the long-layout fixture.

use crate::common::long_dataset;

#[test]
fn test_summary_text() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["summary", "--data", &data]);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], format!("Dataset: {data} (long layout)"));
    assert_eq!(
        lines[1],
        "  3 episodes, 3 characters, 7 credits, 3 pairs, 2 plot groups"
    );
    assert_eq!(lines[2], "  0 rows skipped, 1 duplicate credits collapsed");
    assert!(out.contains("Top 3 characters by appearances:"));
    assert!(out.contains("Rose              3"));
}

#[test]
fn test_summary_json() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["summary", "--data", &data, "--top", "1"]);

    assert_eq!(json["dataset"]["layout"], "long");
    assert_eq!(json["dataset"]["credits"], 7);
    assert_eq!(json["dataset"]["duplicates"], 1);
    assert_eq!(json["top_characters"].as_array().unwrap().len(), 1);
    assert_eq!(json["top_characters"][0]["character"], "Rose");
    assert_eq!(json["top_pairs"][0]["character_a"], "Doctor");
    assert_eq!(json["top_pairs"][0]["character_b"], "Rose");
}

#[test]
fn test_appearances_table() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["appearances", "--data", &data]);
    assert_eq!(
        out,
        "Character  Episodes\n\
         ---------  --------\n\
         Rose              3\n\
         Doctor            2\n\
         Mickey            2\n"
    );
}

#[test]
fn test_pairs_ranked_by_count_then_name() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["pairs", "--data", &data]);
    let pairs = json["pairs"].as_array().unwrap();

    let flat: Vec<(String, String, u64)> = pairs
        .iter()
        .map(|p| {
            (
                p["character_a"].as_str().unwrap().to_string(),
                p["character_b"].as_str().unwrap().to_string(),
                p["count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Doctor".to_string(), "Rose".to_string(), 2),
            ("Mickey".to_string(), "Rose".to_string(), 2),
            ("Doctor".to_string(), "Mickey".to_string(), 1),
        ]
    );
}

#[test]
fn test_pairs_for_one_character() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["pairs", "--data", &data, "--character", "Mickey"]);

    assert_eq!(json["character"], "Mickey");
    assert_eq!(json["appearances"], 2);
    assert_eq!(json["partners"][0]["partner"], "Rose");
    assert_eq!(json["partners"][0]["count"], 2);
    assert_eq!(json["partners"][1]["partner"], "Doctor");
    assert_eq!(json["partners"][1]["count"], 1);
}

#[test]
fn test_partners_limit_keeps_total() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["pairs", "--data", &data, "--character", "Rose", "-n", "1"]);

    assert_eq!(json["total_partners"], 2);
    assert_eq!(json["partners"].as_array().unwrap().len(), 1);
}

#[test]
fn test_pair_is_symmetric() {
    let (harness, data) = long_dataset();
    let ab = harness.run_json(&["pair", "Rose", "Doctor", "--data", &data]);
    let ba = harness.run_json(&["pair", "Doctor", "Rose", "--data", &data]);

    assert_eq!(ab["shared"], 2);
    assert_eq!(ab["shared"], ba["shared"]);
    assert_eq!(ab["appearances_a"], 3);
    assert_eq!(ba["appearances_a"], 2);
}

#[test]
fn test_pair_with_itself_shares_nothing() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["pair", "Rose", "Rose", "--data", &data]);
    assert_eq!(
        out,
        "Rose (3 episodes) and Rose (3 episodes) share 0 episodes\n"
    );
}

#[test]
fn test_arc() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["arc", "Mickey", "--data", &data]);
    assert_eq!(out, "Mickey: 2 of 3 episodes (first 2, last 3)\n  1  .##\n");
}

#[test]
fn test_plots_leaders() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["plots", "--data", &data, "--per-plot", "1"]);
    assert_eq!(
        out,
        "Plot 1 [2 episodes]: Rose (2)\nPlot 2 [1 episodes]: Doctor (1)\n"
    );
}

#[test]
fn test_connections() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["connections", "--data", &data]);
    let rows = json["characters"].as_array().unwrap();

    assert_eq!(rows[0]["character"], "Rose");
    assert_eq!(rows[0]["total"], 4);
    assert_eq!(rows[0]["partners"], 2);
    assert_eq!(rows[1]["character"], "Doctor");
    assert_eq!(rows[1]["total"], 3);
}

#[test]
fn test_matrix_text() {
    let (harness, data) = long_dataset();
    let out = harness.run(&["matrix", "--data", &data]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "           1  2",
            "1. Doctor",
            "2. Mickey  1",
            "3. Rose    2  2",
        ]
    );
}

#[test]
fn test_matrix_json_is_symmetric() {
    let (harness, data) = long_dataset();
    let json = harness.run_json(&["matrix", "--data", &data, "--top", "2"]);

    // Top two by connectedness are Rose and Doctor, listed by name.
    assert_eq!(json["characters"], serde_json::json!(["Doctor", "Rose"]));
    assert_eq!(json["counts"], serde_json::json!([[0, 2], [2, 0]]));
}

#[test]
fn test_clusters_threshold() {
    let (harness, data) = long_dataset();

    let json = harness.run_json(&["clusters", "--data", &data]);
    assert_eq!(
        json["clusters"],
        serde_json::json!([["Doctor", "Mickey", "Rose"]])
    );

    let out = harness.run(&["clusters", "--data", &data, "--min-count", "3"]);
    assert!(out.starts_with("3 clusters (pairs sharing at least 3 episodes):\n"));
    assert!(out.contains("  1. [1] Doctor\n"));
}
