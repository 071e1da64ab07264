//! Survey document model.
//!
//! A survey document is a JSON file describing the questions, answer options,
//! real-world reference data and result bands of one survey. Field names on
//! disk are camelCase; the Rust structs mirror them one-to-one so that a
//! document can be read, handed to the page generator and written back out
//! unchanged.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Lowercase slug: alphanumeric words joined by single dashes
pub const ID_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDocument {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub description: String,
    pub metadata: Metadata,
    pub questions: Vec<Question>,
    pub results: Vec<ResultBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub sample_size: u64,
    pub research_date: String,
    #[serde(default)]
    pub data_source: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
}

/// A published study or dataset the survey numbers come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub year: i32,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// The answer format of a question.
///
/// Any tag other than `choice` or `likert` is preserved as [`QuestionType::Other`]
/// so the rule engine can report it instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Three ranked answer options scored 1..=3
    Choice,
    /// Five-point agreement scale scored 1..=5
    Likert,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Choice => write!(f, "choice"),
            QuestionType::Likert => write!(f, "likert"),
            QuestionType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likert_scale: Option<LikertScale>,
    pub context: QuestionContext,
}

impl Question {
    pub fn percentages(&self) -> Vec<f64> {
        self.options.iter().map(|o| o.real_world_percentage).collect()
    }

    pub fn distribution(&self) -> &[f64] {
        &self.context.real_world_data.distribution
    }

    pub fn max_score(&self) -> i64 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }

    pub fn min_score(&self) -> i64 {
        self.options.iter().map(|o| o.score).min().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikertScale {
    pub min: i64,
    pub max: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContext {
    #[serde(default)]
    pub research_basis: String,
    pub real_world_data: RealWorldData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealWorldData {
    pub total_responses: u64,
    #[serde(default)]
    pub distribution: Vec<f64>,
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub score: i64,
    pub real_world_percentage: f64,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub scientific_basis: String,
}

/// A result entry mapping a total-score range to a narrative outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBand {
    pub title: String,
    pub description: String,
    pub range: String,
    pub percentile: Percentile,
    pub real_world_comparison: RealWorldComparison,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percentile {
    pub value: f64,
    #[serde(default)]
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealWorldComparison {
    #[serde(default)]
    pub description: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    #[serde(default)]
    pub source: String,
}

/// Read a survey file as untyped JSON.
///
/// Schema conformance runs on the raw value, before the typed model is built.
pub fn load_value(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read survey file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse survey file as JSON: {}", path.display()))
}

/// Derive the slug of a survey file: its file name without the `.json` extension.
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Whether `id` is a well-formed survey identifier (see [`ID_PATTERN`])
pub fn is_valid_id(id: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(ID_PATTERN).expect("ID_PATTERN is a valid regex"))
        .is_match(id)
}

/// Location of the survey file for a given identifier inside the surveys directory.
pub fn survey_path(surveys_dir: &Path, id: &str) -> std::path::PathBuf {
    surveys_dir.join(format!("{}.json", id))
}
