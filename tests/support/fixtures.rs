use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(format!("{}.json", name));
    path
}

pub fn load_fixture(name: &str) -> Value {
    let path = fixture_path(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Fixture '{}' is not JSON: {}", name, e))
}

/// A survey that passes every rule: 4 choice + 2 likert questions, scores 6-22
pub fn valid_survey() -> Value {
    load_fixture("valid-survey")
}

/// A valid survey with a different id and title
#[allow(dead_code)]
pub fn survey_with(id: &str, title: &str, sample_size: u64) -> Value {
    let mut survey = valid_survey();
    survey["id"] = Value::from(id);
    survey["title"] = Value::from(title);
    survey["metadata"]["sampleSize"] = Value::from(sample_size);
    for question in survey["questions"].as_array_mut().unwrap() {
        question["context"]["realWorldData"]["totalResponses"] = Value::from(sample_size);
    }
    survey
}

/// The schema shipped at the repository root
pub fn schema_text() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("survey-schema-enhanced.json");
    fs::read_to_string(&path).expect("Failed to read survey schema")
}
