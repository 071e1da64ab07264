//! Tests for `surveyor generate`

use serde_json::json;
use std::fs;

mod support;
use support::fixtures::{survey_with, valid_survey};
use support::harness::{stderr, stdout, TestHarness};

#[test]
fn test_generate_writes_page_and_index_entry() {
    let harness = TestHarness::new();
    harness.add_survey("sleep-habits", &valid_survey());

    let output = harness.run(&["generate", "sleep-habits"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));

    let html = fs::read_to_string(harness.page_path("sleep-habits")).unwrap();
    assert!(html.contains("<title>How Healthy Are Your Sleep Habits?</title>"));
    assert!(html.contains("chart.js"));
    assert!(html.contains("html-to-image"));

    let index = harness.read_index();
    assert_eq!(index["totalCount"], 1);
    assert_eq!(index["surveys"][0]["slug"], "sleep-habits");
    assert_eq!(index["surveys"][0]["metadata"]["sampleSize"], 127);
}

#[test]
fn test_generate_twice_keeps_one_entry() {
    let harness = TestHarness::new();
    harness.add_survey("sleep-habits", &valid_survey());

    assert_eq!(harness.run(&["generate", "sleep-habits"]).status.code(), Some(0));
    assert_eq!(harness.run(&["generate", "sleep-habits"]).status.code(), Some(0));

    let index = harness.read_index();
    assert_eq!(index["totalCount"], 1);
    assert_eq!(index["surveys"].as_array().unwrap().len(), 1);
}

#[test]
fn test_generate_keeps_other_entries_sorted() {
    let harness = TestHarness::new();
    harness.add_survey("stress", &survey_with("stress", "Stress", 203));
    harness.add_survey("diet", &survey_with("diet", "Diet", 318));

    assert_eq!(harness.run(&["generate", "stress"]).status.code(), Some(0));
    assert_eq!(harness.run(&["generate", "diet"]).status.code(), Some(0));

    let index = harness.read_index();
    assert_eq!(index["totalCount"], 2);
    assert_eq!(index["surveys"][0]["slug"], "diet");
    assert_eq!(index["surveys"][1]["slug"], "stress");
}

#[test]
fn test_invalid_survey_writes_nothing() {
    let harness = TestHarness::new();
    let mut survey = valid_survey();
    survey["results"][1]["percentile"]["value"] = json!(5);
    harness.add_survey("sleep-habits", &survey);

    let output = harness.run(&["generate", "sleep-habits"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("percentile-order"));
    assert!(!harness.page_path("sleep-habits").exists());
    assert!(!harness.index_path().exists());
}

#[test]
fn test_ids_outside_the_slug_form_are_rejected() {
    let harness = TestHarness::new();
    harness.add_survey("sleep-habits", &valid_survey());

    for id in ["../surveys/sleep-habits", "Sleep-Habits", "sleep habits"] {
        let output = harness.run(&["generate", id]);
        assert_eq!(output.status.code(), Some(1), "id {:?}", id);
        assert!(stderr(&output).contains("Invalid survey id"));
    }
    assert!(!harness.index_path().exists());
    assert!(!harness.path().join("public").exists());
}

#[test]
fn test_non_http_source_is_not_linked() {
    let harness = TestHarness::new();
    let mut survey = valid_survey();
    survey["metadata"]["dataSource"][1]["url"] = json!("javascript:alert(1)");
    harness.add_survey("sleep-habits", &survey);

    let output = harness.run(&["generate", "sleep-habits"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));

    let html = fs::read_to_string(harness.page_path("sleep-habits")).unwrap();
    assert!(!html.contains("href=\"javascript"));
    assert!(html.contains("Short Sleep Duration Among US Adults (2022)"));
}

#[test]
fn test_unknown_id_exits_one() {
    let harness = TestHarness::new();
    let output = harness.run(&["generate", "missing"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_page_sample_size_is_clamped() {
    let harness = TestHarness::with_config(
        r#"---
rules:
  disable:
    - sample-size
---
"#,
    );
    harness.add_survey("sleep-habits", &survey_with("sleep-habits", "Sleep", 4000));

    let output = harness.run(&["generate", "sleep-habits"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));

    let html = fs::read_to_string(harness.page_path("sleep-habits")).unwrap();
    assert!(html.contains("based on 600 real responses"));
}
