//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::score::MinScoreDefinition;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_schema, String, "survey-schema-enhanced.json".to_string());
default_fn!(default_surveys_dir, String, "surveys".to_string());
default_fn!(default_output_dir, String, "public/survey".to_string());
default_fn!(default_index_file, String, "surveys-list.json".to_string());
default_fn!(default_expected_questions, Option<usize>, Some(6));
default_fn!(default_expected_results, Option<usize>, Some(3));
default_fn!(default_choice_options, usize, 3);
default_fn!(default_min_label_length, usize, 3);
default_fn!(default_percentage_tolerance, f64, 2.0);
default_fn!(default_distribution_tolerance, f64, 2.0);
default_fn!(default_consistency_tolerance, f64, 1.0);
default_fn!(default_result_tolerance, f64, 5.0);
default_fn!(default_min_sample_size, u64, 25);
default_fn!(default_max_sample_size, u64, 600);
default_fn!(default_min_recommendations, usize, 3);
default_fn!(default_true, bool, true);
default_fn!(default_max_examples, usize, 5);
default_fn!(default_lang, String, "en".to_string());
default_fn!(default_min_source_year, i32, 2010);
default_fn!(default_max_source_year, i32, 2026);
default_fn!(default_warning, Severity, Severity::Warning);
default_fn!(default_error, Severity, Severity::Error);
default_fn!(
    default_accepted_schemes,
    Vec<String>,
    vec!["http://".to_string(), "https://".to_string()]
);
default_fn!(
    default_placeholder_patterns,
    Vec<String>,
    vec![
        "example.com".to_string(),
        "example.org".to_string(),
        "localhost".to_string(),
        "placeholder".to_string(),
        "your-url".to_string(),
        "xxx".to_string(),
        "lorem".to_string(),
    ]
);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Where surveys, the schema and generated pages live, relative to the
/// working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Schema every survey must conform to (default: survey-schema-enhanced.json)
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Directory holding `<id>.json` survey files (default: surveys)
    #[serde(default = "default_surveys_dir")]
    pub surveys_dir: String,
    /// Root of generated pages; each survey lands in `<output_dir>/<id>/index.html`
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// File name of the survey list inside `output_dir` (default: surveys-list.json)
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            surveys_dir: default_surveys_dir(),
            output_dir: default_output_dir(),
            index_file: default_index_file(),
        }
    }
}

/// Checks applied to the `metadata.dataSource` entries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcePolicy {
    /// URL prefixes a source link may start with
    #[serde(default = "default_accepted_schemes")]
    pub accepted_schemes: Vec<String>,
    /// Case-insensitive substrings marking a link as a placeholder
    #[serde(default = "default_placeholder_patterns")]
    pub placeholder_patterns: Vec<String>,
    /// Earliest plausible publication year (default: 2010)
    #[serde(default = "default_min_source_year")]
    pub min_year: i32,
    /// Latest plausible publication year (default: 2026)
    #[serde(default = "default_max_source_year")]
    pub max_year: i32,
    /// Severity of a malformed or non-http(s) URL (default: warning)
    #[serde(default = "default_warning")]
    pub url_severity: Severity,
    /// Severity of a placeholder-looking URL (default: warning)
    #[serde(default = "default_warning")]
    pub placeholder_severity: Severity,
    /// Severity of a year outside the plausible range (default: error)
    #[serde(default = "default_error")]
    pub year_severity: Severity,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self {
            accepted_schemes: default_accepted_schemes(),
            placeholder_patterns: default_placeholder_patterns(),
            min_year: default_min_source_year(),
            max_year: default_max_source_year(),
            url_severity: default_warning(),
            placeholder_severity: default_warning(),
            year_severity: default_error(),
        }
    }
}

/// The consistency rule set.
///
/// Every knob on which observed survey formats disagree is a named field here
/// rather than a hard-coded constant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulePolicy {
    /// Required number of questions; `null` disables the check (default: 6)
    #[serde(default = "default_expected_questions")]
    pub expected_questions: Option<usize>,
    /// Required number of result bands; `null` disables the check (default: 3)
    #[serde(default = "default_expected_results")]
    pub expected_results: Option<usize>,
    /// Options per choice question, also the highest choice score (default: 3)
    #[serde(default = "default_choice_options")]
    pub choice_options: usize,
    /// Minimum characters of each likert scale label (default: 3)
    #[serde(default = "default_min_label_length")]
    pub min_label_length: usize,
    /// Allowed deviation of option percentages from 100 (default: 2)
    #[serde(default = "default_percentage_tolerance")]
    pub percentage_tolerance: f64,
    /// Allowed deviation of the context distribution from 100 (default: 2)
    #[serde(default = "default_distribution_tolerance")]
    pub distribution_tolerance: f64,
    /// Allowed gap between a distribution entry and its option percentage (default: 1)
    #[serde(default = "default_consistency_tolerance")]
    pub consistency_tolerance: f64,
    /// Allowed deviation of the result comparison percentages from 100 (default: 5)
    #[serde(default = "default_result_tolerance")]
    pub result_tolerance: f64,
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: u64,
    #[serde(default = "default_max_sample_size")]
    pub max_sample_size: u64,
    /// How the lowest achievable total score is derived
    #[serde(default)]
    pub min_score_definition: MinScoreDefinition,
    /// Require `next.min == prev.max + 1` between result ranges (default: true)
    #[serde(default = "default_true")]
    pub require_contiguous_ranges: bool,
    /// Minimum recommendations per result (default: 3)
    #[serde(default = "default_min_recommendations")]
    pub min_recommendations: usize,
    #[serde(default)]
    pub sources: SourcePolicy,
    /// Rule names to skip entirely
    #[serde(default)]
    pub disable: Vec<String>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            expected_questions: default_expected_questions(),
            expected_results: default_expected_results(),
            choice_options: default_choice_options(),
            min_label_length: default_min_label_length(),
            percentage_tolerance: default_percentage_tolerance(),
            distribution_tolerance: default_distribution_tolerance(),
            consistency_tolerance: default_consistency_tolerance(),
            result_tolerance: default_result_tolerance(),
            min_sample_size: default_min_sample_size(),
            max_sample_size: default_max_sample_size(),
            min_score_definition: MinScoreDefinition::default(),
            require_contiguous_ranges: default_true(),
            min_recommendations: default_min_recommendations(),
            sources: SourcePolicy::default(),
            disable: Vec::new(),
        }
    }
}

impl RulePolicy {
    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.disable.iter().any(|d| d == rule)
    }
}

/// Console report options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Violations listed per rule before the rest is summarized (default: 5)
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_examples: default_max_examples(),
        }
    }
}

/// Generated page options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Value of the page's `lang` attribute (default: en)
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}
