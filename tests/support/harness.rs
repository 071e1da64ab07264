use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures;

/// TestHarness provides an isolated surveyor project.
///
/// Each harness creates a temporary directory holding the survey schema and
/// an empty `surveys/` directory. Commands run with that directory as their
/// working directory, so the default config paths apply.
pub struct TestHarness {
    pub dir: TempDir,
    pub surveys_dir: PathBuf,
    #[allow(dead_code)]
    pub config_path: PathBuf,
    pub surveyor_binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path();

        let surveys_dir = base_path.join("surveys");
        fs::create_dir_all(&surveys_dir).expect("Failed to create surveys dir");
        fs::write(
            base_path.join("survey-schema-enhanced.json"),
            fixtures::schema_text(),
        )
        .expect("Failed to write schema");

        TestHarness {
            config_path: base_path.join(".surveyor/config.md"),
            dir: temp_dir,
            surveys_dir,
            surveyor_binary: PathBuf::from(env!("CARGO_BIN_EXE_surveyor")),
        }
    }

    /// Creates a test harness with custom config content.
    #[allow(dead_code)]
    pub fn with_config(config_content: &str) -> Self {
        let harness = Self::new();
        fs::create_dir_all(harness.config_path.parent().unwrap()).unwrap();
        fs::write(&harness.config_path, config_content).expect("Failed to write custom config");
        harness
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Executes the surveyor binary with the given arguments in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.surveyor_binary)
            .args(args)
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("SURVEYOR_QUIET")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run surveyor")
    }

    /// Writes `surveys/<slug>.json`.
    pub fn add_survey(&self, slug: &str, survey: &Value) -> PathBuf {
        let path = self.surveys_dir.join(format!("{}.json", slug));
        fs::write(&path, serde_json::to_string_pretty(survey).unwrap())
            .expect("Failed to write survey");
        path
    }

    #[allow(dead_code)]
    pub fn page_path(&self, slug: &str) -> PathBuf {
        self.path().join("public/survey").join(slug).join("index.html")
    }

    #[allow(dead_code)]
    pub fn index_path(&self) -> PathBuf {
        self.path().join("public/survey/surveys-list.json")
    }

    /// Reads and parses the survey list.
    #[allow(dead_code)]
    pub fn read_index(&self) -> Value {
        let content = fs::read_to_string(self.index_path()).expect("Failed to read index");
        serde_json::from_str(&content).expect("Index is not JSON")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
