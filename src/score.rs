//! Derived scoring facts for a survey.
//!
//! The score model is computed once per document and shared by the rule
//! engine (range checks), the report (statistics) and the page generator
//! (score display).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::survey::{QuestionType, SurveyDocument};

/// How the lowest achievable total score is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MinScoreDefinition {
    /// One point per question
    QuestionCount,
    /// Sum of each question's lowest option score
    #[default]
    SumOfMinimums,
}

impl std::fmt::Display for MinScoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinScoreDefinition::QuestionCount => write!(f, "question-count"),
            MinScoreDefinition::SumOfMinimums => write!(f, "sum-of-minimums"),
        }
    }
}

/// A parsed `"min-max"` result range (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBand {
    pub min: i64,
    pub max: i64,
}

impl ScoreBand {
    pub fn contains(&self, score: i64) -> bool {
        score >= self.min && score <= self.max
    }
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(-?\d+)\s*-\s*(-?\d+)\s*$").expect("range pattern is a valid regex")
    })
}

/// Parse a `"min-max"` range such as `"6-8"`.
///
/// Returns `None` for anything that is not two integers joined by a dash.
pub fn parse_range(range: &str) -> Option<ScoreBand> {
    let caps = range_pattern().captures(range)?;
    let min = caps.get(1)?.as_str().parse().ok()?;
    let max = caps.get(2)?.as_str().parse().ok()?;
    Some(ScoreBand { min, max })
}

/// Sum that sticks at the `i64` bounds instead of overflowing.
///
/// Only a schema looser than the shipped one lets scores reach those bounds.
fn saturating_sum(scores: impl Iterator<Item = i64>) -> i64 {
    scores.fold(0i64, |total, score| total.saturating_add(score))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreModel {
    /// Highest option score of each question, in question order
    pub per_question_max: Vec<i64>,
    pub max_possible: i64,
    pub min_possible: i64,
    pub min_definition: MinScoreDefinition,
    pub choice_count: usize,
    pub likert_count: usize,
    /// Questions whose type tag is neither `choice` nor `likert`
    pub unknown_count: usize,
    /// Parsed result ranges, `None` where the text is malformed
    pub bands: Vec<Option<ScoreBand>>,
}

impl ScoreModel {
    pub fn compute(doc: &SurveyDocument, min_definition: MinScoreDefinition) -> Self {
        let per_question_max: Vec<i64> = doc.questions.iter().map(|q| q.max_score()).collect();
        let max_possible = saturating_sum(per_question_max.iter().copied());

        let min_possible = match min_definition {
            MinScoreDefinition::QuestionCount => {
                i64::try_from(doc.questions.len()).unwrap_or(i64::MAX)
            }
            MinScoreDefinition::SumOfMinimums => {
                saturating_sum(doc.questions.iter().map(|q| q.min_score()))
            }
        };

        let mut choice_count = 0;
        let mut likert_count = 0;
        let mut unknown_count = 0;
        for question in &doc.questions {
            match question.kind {
                QuestionType::Choice => choice_count += 1,
                QuestionType::Likert => likert_count += 1,
                QuestionType::Other(_) => unknown_count += 1,
            }
        }

        let bands = doc.results.iter().map(|r| parse_range(&r.range)).collect();

        Self {
            per_question_max,
            max_possible,
            min_possible,
            min_definition,
            choice_count,
            likert_count,
            unknown_count,
            bands,
        }
    }

    pub fn question_count(&self) -> usize {
        self.per_question_max.len()
    }

    /// Index of the first result band whose range contains `score`
    pub fn band_for(&self, score: i64) -> Option<usize> {
        self.bands
            .iter()
            .position(|band| band.is_some_and(|b| b.contains(score)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{
        AnswerOption, Metadata, Percentile, Question, QuestionContext, RealWorldComparison,
        RealWorldData, ResultBand,
    };

    fn question(kind: QuestionType, scores: &[i64]) -> Question {
        Question {
            text: "q".to_string(),
            kind,
            options: scores
                .iter()
                .map(|s| AnswerOption {
                    text: s.to_string(),
                    score: *s,
                    real_world_percentage: 0.0,
                    analysis: String::new(),
                    scientific_basis: String::new(),
                })
                .collect(),
            likert_scale: None,
            context: QuestionContext {
                research_basis: String::new(),
                real_world_data: RealWorldData {
                    total_responses: 0,
                    distribution: vec![],
                },
            },
        }
    }

    fn band(range: &str) -> ResultBand {
        ResultBand {
            title: "t".to_string(),
            description: "d".to_string(),
            range: range.to_string(),
            percentile: Percentile {
                value: 0.0,
                interpretation: String::new(),
            },
            real_world_comparison: RealWorldComparison {
                description: String::new(),
                percentage: 0.0,
            },
            recommendations: vec![],
        }
    }

    fn doc(questions: Vec<Question>, ranges: &[&str]) -> SurveyDocument {
        SurveyDocument {
            id: "s".to_string(),
            title: "t".to_string(),
            topic: "t".to_string(),
            description: "d".to_string(),
            metadata: Metadata {
                sample_size: 127,
                research_date: "2024".to_string(),
                data_source: vec![],
                demographics: None,
            },
            questions,
            results: ranges.iter().map(|r| band(r)).collect(),
        }
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("6-8"), Some(ScoreBand { min: 6, max: 8 }));
        assert_eq!(parse_range(" 11 - 12 "), Some(ScoreBand { min: 11, max: 12 }));
        assert_eq!(parse_range("6"), None);
        assert_eq!(parse_range("a-b"), None);
        assert_eq!(parse_range("6-8-10"), None);
    }

    #[test]
    fn test_compute_mixed_survey() {
        let mut questions: Vec<Question> = (0..4)
            .map(|_| question(QuestionType::Choice, &[1, 2, 3]))
            .collect();
        questions.push(question(QuestionType::Likert, &[1, 2, 3, 4, 5]));
        questions.push(question(QuestionType::Likert, &[1, 2, 3, 4, 5]));

        let model = ScoreModel::compute(
            &doc(questions, &["6-8", "9-10", "11-12"]),
            MinScoreDefinition::SumOfMinimums,
        );

        assert_eq!(model.max_possible, 22);
        assert_eq!(model.min_possible, 6);
        assert_eq!(model.choice_count, 4);
        assert_eq!(model.likert_count, 2);
        assert_eq!(model.unknown_count, 0);
        assert_eq!(model.per_question_max, vec![3, 3, 3, 3, 5, 5]);
        assert_eq!(model.question_count(), 6);
    }

    #[test]
    fn test_min_definitions_diverge_when_options_start_above_one() {
        let questions = vec![
            question(QuestionType::Choice, &[2, 3]),
            question(QuestionType::Choice, &[2, 3]),
        ];
        let d = doc(questions, &[]);

        assert_eq!(
            ScoreModel::compute(&d, MinScoreDefinition::QuestionCount).min_possible,
            2
        );
        assert_eq!(
            ScoreModel::compute(&d, MinScoreDefinition::SumOfMinimums).min_possible,
            4
        );
    }

    #[test]
    fn test_unknown_types_are_counted() {
        let questions = vec![
            question(QuestionType::Other("slider".to_string()), &[1]),
            question(QuestionType::Choice, &[1, 2, 3]),
        ];
        let model = ScoreModel::compute(&doc(questions, &[]), MinScoreDefinition::default());
        assert_eq!(model.unknown_count, 1);
        assert_eq!(model.choice_count, 1);
    }

    #[test]
    fn test_huge_scores_saturate() {
        let questions = vec![
            question(QuestionType::Choice, &[1, 2, i64::MAX]),
            question(QuestionType::Choice, &[1, 2, i64::MAX]),
            question(QuestionType::Choice, &[i64::MIN, 0]),
            question(QuestionType::Choice, &[i64::MIN, 0]),
        ];
        let model = ScoreModel::compute(&doc(questions, &[]), MinScoreDefinition::SumOfMinimums);
        assert_eq!(model.max_possible, i64::MAX);
        assert_eq!(model.min_possible, i64::MIN);
    }

    #[test]
    fn test_band_for() {
        let questions = vec![question(QuestionType::Choice, &[1, 2, 3])];
        let model = ScoreModel::compute(
            &doc(questions, &["1-1", "bogus", "2-3"]),
            MinScoreDefinition::default(),
        );

        assert_eq!(model.band_for(1), Some(0));
        assert_eq!(model.band_for(3), Some(2));
        assert_eq!(model.band_for(7), None);
        assert_eq!(model.bands[1], None);
    }
}
