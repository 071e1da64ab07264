//! Consistency rule engine.
//!
//! Runs an ordered battery of independent domain rules against a
//! structurally valid survey. Every rule appends to a shared [`Diagnostics`]
//! collector and never aborts the run, so a single invocation surfaces the
//! complete set of defects.
//!
//! Rules, in evaluation order:
//!
//! | # | name | checks |
//! |---|------|--------|
//! | 1 | `question-count` | number of questions |
//! | 2 | `result-count` | number of result bands |
//! | 3 | `question-type` | type tag is `choice` or `likert` |
//! | 4 | `choice-shape` | option/distribution cardinality, score range |
//! | 5 | `likert-shape` | scale bounds, labels, options `1`..`5` |
//! | 6 | `percentage-sum` | option percentages sum to ~100 |
//! | 7 | `distribution-sum` | context distribution sums to ~100 |
//! | 8 | `distribution-consistency` | distribution matches option percentages |
//! | 9 | `response-total` | total responses equal the sample size |
//! | 10 | `sample-size` | bounds and digit diversity |
//! | 11 | `result-percentage-sum` | result comparison percentages sum to ~100 |
//! | 12 | `percentile-order` | strictly increasing percentiles |
//! | 13 | `range-bounds` | ranges within achievable scores, contiguous |
//! | 14 | `sources` | source URLs and years |
//! | 15 | `recommendations` | minimum recommendations per result |
//!
//! A question with an unknown type tag is reported by `question-type` and
//! skipped by every later per-question rule; other questions are unaffected.

mod metadata;
mod questions;
mod results;

use crate::config::RulePolicy;
use crate::diagnostic::Diagnostics;
use crate::score::ScoreModel;
use crate::survey::{Question, QuestionType, SurveyDocument};

pub const QUESTION_COUNT: &str = "question-count";
pub const RESULT_COUNT: &str = "result-count";
pub const QUESTION_TYPE: &str = "question-type";
pub const CHOICE_SHAPE: &str = "choice-shape";
pub const LIKERT_SHAPE: &str = "likert-shape";
pub const PERCENTAGE_SUM: &str = "percentage-sum";
pub const DISTRIBUTION_SUM: &str = "distribution-sum";
pub const DISTRIBUTION_CONSISTENCY: &str = "distribution-consistency";
pub const RESPONSE_TOTAL: &str = "response-total";
pub const SAMPLE_SIZE: &str = "sample-size";
pub const RESULT_PERCENTAGE_SUM: &str = "result-percentage-sum";
pub const PERCENTILE_ORDER: &str = "percentile-order";
pub const RANGE_BOUNDS: &str = "range-bounds";
pub const SOURCES: &str = "sources";
pub const RECOMMENDATIONS: &str = "recommendations";

/// Every rule name, in evaluation order
pub const RULE_NAMES: [&str; 15] = [
    QUESTION_COUNT,
    RESULT_COUNT,
    QUESTION_TYPE,
    CHOICE_SHAPE,
    LIKERT_SHAPE,
    PERCENTAGE_SUM,
    DISTRIBUTION_SUM,
    DISTRIBUTION_CONSISTENCY,
    RESPONSE_TOTAL,
    SAMPLE_SIZE,
    RESULT_PERCENTAGE_SUM,
    PERCENTILE_ORDER,
    RANGE_BOUNDS,
    SOURCES,
    RECOMMENDATIONS,
];

/// Likert scales are fixed at five points
pub const LIKERT_POINTS: usize = 5;

// Absorbs float noise such as 45.1 - 44.1 = 1.0000000000000142
const EPSILON: f64 = 1e-9;

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub doc: &'a SurveyDocument,
    pub score: &'a ScoreModel,
    pub policy: &'a RulePolicy,
}

impl<'a> RuleContext<'a> {
    /// Questions with a known type tag, with their index
    pub fn typed_questions(&self) -> impl Iterator<Item = (usize, &'a Question)> + 'a {
        let doc: &'a SurveyDocument = self.doc;
        doc.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| !matches!(q.kind, QuestionType::Other(_)))
    }

    pub fn typed_question_count(&self) -> usize {
        self.typed_questions().count()
    }
}

type RuleFn = fn(&RuleContext<'_>, &mut Diagnostics);

const RULES: [(&str, RuleFn); 15] = [
    (QUESTION_COUNT, questions::check_question_count),
    (RESULT_COUNT, results::check_result_count),
    (QUESTION_TYPE, questions::check_question_types),
    (CHOICE_SHAPE, questions::check_choice_shape),
    (LIKERT_SHAPE, questions::check_likert_shape),
    (PERCENTAGE_SUM, questions::check_percentage_sum),
    (DISTRIBUTION_SUM, questions::check_distribution_sum),
    (DISTRIBUTION_CONSISTENCY, questions::check_distribution_consistency),
    (RESPONSE_TOTAL, questions::check_response_total),
    (SAMPLE_SIZE, metadata::check_sample_size),
    (RESULT_PERCENTAGE_SUM, results::check_result_percentage_sum),
    (PERCENTILE_ORDER, results::check_percentile_order),
    (RANGE_BOUNDS, results::check_range_bounds),
    (SOURCES, metadata::check_sources),
    (RECOMMENDATIONS, results::check_recommendations),
];

pub struct RuleEngine<'a> {
    policy: &'a RulePolicy,
}

impl<'a> RuleEngine<'a> {
    pub fn new(policy: &'a RulePolicy) -> Self {
        Self { policy }
    }

    /// Run every enabled rule and return the collected diagnostics.
    pub fn run(&self, doc: &SurveyDocument, score: &ScoreModel) -> Diagnostics {
        let ctx = RuleContext {
            doc,
            score,
            policy: self.policy,
        };

        let mut diags = Diagnostics::new();
        for (name, rule) in RULES {
            if !self.policy.is_enabled(name) {
                tracing::debug!(rule = name, "rule disabled by config");
                continue;
            }

            let before = diags.len();
            rule(&ctx, &mut diags);
            tracing::debug!(rule = name, findings = diags.len() - before, "rule evaluated");
        }

        diags
    }
}

/// True when `value` is further than `tolerance` from `target`
pub(crate) fn outside_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() > tolerance + EPSILON
}

/// Format a percentage without float noise (`99.5`, `100`)
pub(crate) fn pct(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}
