//! Per-question rules: counts, type tags, answer shapes and real-world data.

use super::{
    outside_tolerance, pct, RuleContext, CHOICE_SHAPE, DISTRIBUTION_CONSISTENCY,
    DISTRIBUTION_SUM, LIKERT_POINTS, LIKERT_SHAPE, PERCENTAGE_SUM, QUESTION_COUNT,
    QUESTION_TYPE, RESPONSE_TOTAL,
};
use crate::diagnostic::{Diagnostics, Location};
use crate::survey::{Question, QuestionType};

pub(super) fn check_question_count(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(QUESTION_COUNT, 1);

    let Some(expected) = ctx.policy.expected_questions else {
        return;
    };

    let actual = ctx.doc.questions.len();
    if actual != expected {
        diags.error(
            QUESTION_COUNT,
            Location::Document,
            format!("survey has {} questions, expected {}", actual, expected),
        );
    }
}

pub(super) fn check_question_types(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(QUESTION_TYPE, ctx.doc.questions.len());

    for (idx, question) in ctx.doc.questions.iter().enumerate() {
        if let QuestionType::Other(tag) = &question.kind {
            diags.error(
                QUESTION_TYPE,
                Location::Question { question: idx },
                format!(
                    "unknown question type '{}' (expected 'choice' or 'likert'); remaining checks skipped for this question",
                    tag
                ),
            );
        }
    }
}

pub(super) fn check_choice_shape(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let expected = ctx.policy.choice_options;
    let choices: Vec<(usize, &Question)> = ctx
        .typed_questions()
        .filter(|(_, q)| q.kind == QuestionType::Choice)
        .collect();
    diags.record_rule(CHOICE_SHAPE, choices.len());

    for (idx, question) in choices {
        let location = Location::Question { question: idx };

        if question.options.len() != expected {
            diags.error(
                CHOICE_SHAPE,
                location,
                format!(
                    "choice question has {} options, expected exactly {}",
                    question.options.len(),
                    expected
                ),
            );
        }

        let dist_len = question.distribution().len();
        if dist_len != expected {
            diags.error(
                CHOICE_SHAPE,
                location,
                format!(
                    "distribution has {} entries, expected {} (one per option)",
                    dist_len, expected
                ),
            );
        }

        for (opt_idx, option) in question.options.iter().enumerate() {
            if option.score < 1 || option.score > expected as i64 {
                diags.error(
                    CHOICE_SHAPE,
                    Location::QuestionOption {
                        question: idx,
                        option: opt_idx,
                    },
                    format!("score {} is outside 1-{}", option.score, expected),
                );
            }
        }
    }
}

pub(super) fn check_likert_shape(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let likerts: Vec<(usize, &Question)> = ctx
        .typed_questions()
        .filter(|(_, q)| q.kind == QuestionType::Likert)
        .collect();
    diags.record_rule(LIKERT_SHAPE, likerts.len());

    let min_label = ctx.policy.min_label_length;

    for (idx, question) in likerts {
        let location = Location::Question { question: idx };

        match &question.likert_scale {
            None => diags.error(LIKERT_SHAPE, location, "likert question has no likertScale"),
            Some(scale) => {
                if scale.min != 1 || scale.max != LIKERT_POINTS as i64 {
                    diags.error(
                        LIKERT_SHAPE,
                        location,
                        format!(
                            "likertScale must run from 1 to {}, found {} to {}",
                            LIKERT_POINTS, scale.min, scale.max
                        ),
                    );
                }

                for (name, label) in [("minLabel", &scale.min_label), ("maxLabel", &scale.max_label)] {
                    match label.as_deref().map(str::trim) {
                        None | Some("") => diags.error(
                            LIKERT_SHAPE,
                            location,
                            format!("likertScale.{} is missing", name),
                        ),
                        Some(text) if text.chars().count() < min_label => diags.error(
                            LIKERT_SHAPE,
                            location,
                            format!(
                                "likertScale.{} '{}' is shorter than {} characters",
                                name, text, min_label
                            ),
                        ),
                        Some(_) => {}
                    }
                }
            }
        }

        if question.options.len() != LIKERT_POINTS {
            diags.error(
                LIKERT_SHAPE,
                location,
                format!(
                    "likert question has {} options, expected exactly {}",
                    question.options.len(),
                    LIKERT_POINTS
                ),
            );
        }

        let dist_len = question.distribution().len();
        if dist_len != LIKERT_POINTS {
            diags.error(
                LIKERT_SHAPE,
                location,
                format!(
                    "distribution has {} entries, expected {}",
                    dist_len, LIKERT_POINTS
                ),
            );
        }

        for (opt_idx, option) in question.options.iter().enumerate() {
            let ordinal = opt_idx + 1;
            let opt_location = Location::QuestionOption {
                question: idx,
                option: opt_idx,
            };

            if option.text.trim() != ordinal.to_string() {
                diags.error(
                    LIKERT_SHAPE,
                    opt_location,
                    format!("likert option text must be \"{}\", found \"{}\"", ordinal, option.text),
                );
            }

            if option.score != ordinal as i64 {
                diags.error(
                    LIKERT_SHAPE,
                    opt_location,
                    format!("likert option score must be {}, found {}", ordinal, option.score),
                );
            }
        }
    }
}

pub(super) fn check_percentage_sum(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(PERCENTAGE_SUM, ctx.typed_question_count());
    let tolerance = ctx.policy.percentage_tolerance;

    for (idx, question) in ctx.typed_questions() {
        let sum: f64 = question.percentages().iter().sum();
        if outside_tolerance(sum, 100.0, tolerance) {
            diags.error(
                PERCENTAGE_SUM,
                Location::Question { question: idx },
                format!(
                    "option percentages sum to {}%, expected 100% ±{}",
                    pct(sum),
                    pct(tolerance)
                ),
            );
        }
    }
}

pub(super) fn check_distribution_sum(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(DISTRIBUTION_SUM, ctx.typed_question_count());
    let tolerance = ctx.policy.distribution_tolerance;

    for (idx, question) in ctx.typed_questions() {
        let sum: f64 = question.distribution().iter().sum();
        if outside_tolerance(sum, 100.0, tolerance) {
            diags.error(
                DISTRIBUTION_SUM,
                Location::Question { question: idx },
                format!(
                    "context distribution sums to {}%, expected 100% ±{}",
                    pct(sum),
                    pct(tolerance)
                ),
            );
        }
    }
}

pub(super) fn check_distribution_consistency(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(DISTRIBUTION_CONSISTENCY, ctx.typed_question_count());
    let tolerance = ctx.policy.consistency_tolerance;

    for (idx, question) in ctx.typed_questions() {
        // Cardinality mismatches belong to the shape rules; compare what lines up
        for (opt_idx, (dist, option)) in question
            .distribution()
            .iter()
            .zip(question.options.iter())
            .enumerate()
        {
            if outside_tolerance(*dist, option.real_world_percentage, tolerance) {
                diags.error(
                    DISTRIBUTION_CONSISTENCY,
                    Location::QuestionOption {
                        question: idx,
                        option: opt_idx,
                    },
                    format!(
                        "distribution ({}%) disagrees with realWorldPercentage ({}%)",
                        pct(*dist),
                        pct(option.real_world_percentage)
                    ),
                );
            }
        }
    }
}

pub(super) fn check_response_total(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(RESPONSE_TOTAL, ctx.typed_question_count());
    let sample_size = ctx.doc.metadata.sample_size;

    for (idx, question) in ctx.typed_questions() {
        let total = question.context.real_world_data.total_responses;
        if total != sample_size {
            diags.error(
                RESPONSE_TOTAL,
                Location::Question { question: idx },
                format!(
                    "totalResponses is {}, but metadata.sampleSize is {}",
                    total, sample_size
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{run, valid_doc};
    use super::*;
    use crate::config::RulePolicy;
    use crate::survey::LikertScale;

    const CHOICE_Q: usize = 0;
    const LIKERT_Q: usize = 4;

    fn messages(diags: &Diagnostics, rule: &str) -> Vec<String> {
        diags.for_rule(rule).map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_question_count_mismatch() {
        let mut doc = valid_doc();
        let extra = doc.questions[0].clone();
        doc.questions.push(extra);

        let diags = run(&doc, &RulePolicy::default());
        assert_eq!(
            messages(&diags, QUESTION_COUNT),
            vec!["survey has 7 questions, expected 6"]
        );
    }

    #[test]
    fn test_question_count_disabled_by_null_policy() {
        let mut doc = valid_doc();
        doc.questions.truncate(4);

        let policy = RulePolicy {
            expected_questions: None,
            ..RulePolicy::default()
        };
        let diags = run(&doc, &policy);
        assert_eq!(diags.for_rule(QUESTION_COUNT).count(), 0);
    }

    #[test]
    fn test_unknown_type_skips_only_that_question() {
        let mut doc = valid_doc();
        doc.questions[1].kind = QuestionType::Other("slider".to_string());
        doc.questions[1].options[0].real_world_percentage = 90.0;
        doc.questions[3].options[0].real_world_percentage = 90.0;

        let diags = run(&doc, &RulePolicy::default());

        let type_errors: Vec<_> = diags.for_rule(QUESTION_TYPE).collect();
        assert_eq!(type_errors.len(), 1);
        assert_eq!(type_errors[0].location, Location::Question { question: 1 });
        assert!(type_errors[0].message.contains("slider"));

        // Question 2 (index 1) is skipped; question 4 (index 3) is still checked
        let sum_locations: Vec<_> = diags.for_rule(PERCENTAGE_SUM).map(|d| d.location).collect();
        assert_eq!(sum_locations, vec![Location::Question { question: 3 }]);
    }

    #[test]
    fn test_choice_shape_cardinality_and_scores() {
        let mut doc = valid_doc();
        let q = &mut doc.questions[CHOICE_Q];
        q.options[2].score = 4;
        q.context.real_world_data.distribution.pop();

        let diags = run(&doc, &RulePolicy::default());
        let errs: Vec<_> = diags.for_rule(CHOICE_SHAPE).collect();
        assert_eq!(errs.len(), 2);
        assert!(errs[0].message.contains("distribution has 2 entries"));
        assert_eq!(
            errs[1].location,
            Location::QuestionOption {
                question: CHOICE_Q,
                option: 2
            }
        );
    }

    #[test]
    fn test_choice_with_four_options() {
        let mut doc = valid_doc();
        let q = &mut doc.questions[CHOICE_Q];
        let extra = q.options[0].clone();
        q.options.push(extra);

        let diags = run(&doc, &RulePolicy::default());
        assert!(messages(&diags, CHOICE_SHAPE)
            .iter()
            .any(|m| m == "choice question has 4 options, expected exactly 3"));
    }

    #[test]
    fn test_likert_missing_scale_names_question() {
        let mut doc = valid_doc();
        doc.questions[LIKERT_Q].likert_scale = None;

        let diags = run(&doc, &RulePolicy::default());
        let errs: Vec<_> = diags.for_rule(LIKERT_SHAPE).collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].location, Location::Question { question: LIKERT_Q });
        assert_eq!(errs[0].message, "likert question has no likertScale");
        assert!(diags.has_errors());
    }

    #[test]
    fn test_likert_scale_bounds_and_labels() {
        let mut doc = valid_doc();
        doc.questions[LIKERT_Q].likert_scale = Some(LikertScale {
            min: 0,
            max: 5,
            min_label: Some("No".to_string()),
            max_label: None,
        });

        let diags = run(&doc, &RulePolicy::default());
        let msgs = messages(&diags, LIKERT_SHAPE);
        assert_eq!(msgs.len(), 3);
        assert!(msgs[0].contains("from 1 to 5, found 0 to 5"));
        assert!(msgs[1].contains("minLabel 'No' is shorter than 3"));
        assert!(msgs[2].contains("maxLabel is missing"));
    }

    #[test]
    fn test_likert_option_text_and_score_must_match_ordinal() {
        let mut doc = valid_doc();
        let q = &mut doc.questions[LIKERT_Q];
        q.options.swap(0, 1);
        q.context.real_world_data.distribution.swap(0, 1);

        let diags = run(&doc, &RulePolicy::default());
        let errs: Vec<_> = diags.for_rule(LIKERT_SHAPE).collect();
        // Two options, each with a wrong text and a wrong score
        assert_eq!(errs.len(), 4);
        assert!(errs.iter().all(|d| matches!(
            d.location,
            Location::QuestionOption { question: LIKERT_Q, option: 0 | 1 }
        )));
    }

    #[test]
    fn test_percentage_sum_within_tolerance_passes() {
        let mut doc = valid_doc();
        // 100 -> 102, on the tolerance edge
        doc.questions[CHOICE_Q].options[0].real_world_percentage += 2.0;
        doc.questions[CHOICE_Q].context.real_world_data.distribution[0] += 1.0;

        let diags = run(&doc, &RulePolicy::default());
        assert_eq!(diags.for_rule(PERCENTAGE_SUM).count(), 0);
        assert_eq!(diags.for_rule(DISTRIBUTION_CONSISTENCY).count(), 0);
    }

    #[test]
    fn test_distribution_sum_outside_tolerance() {
        let mut doc = valid_doc();
        doc.questions[CHOICE_Q].context.real_world_data.distribution[1] -= 5.0;

        let diags = run(&doc, &RulePolicy::default());
        let msgs = messages(&diags, DISTRIBUTION_SUM);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].starts_with("context distribution sums to 95%"));
        assert_eq!(diags.for_rule(DISTRIBUTION_CONSISTENCY).count(), 1);
    }

    #[test]
    fn test_response_total_mismatch() {
        let mut doc = valid_doc();
        doc.questions[5].context.real_world_data.total_responses = 100;

        let diags = run(&doc, &RulePolicy::default());
        let errs: Vec<_> = diags.for_rule(RESPONSE_TOTAL).collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].location, Location::Question { question: 5 });
        assert_eq!(
            errs[0].message,
            "totalResponses is 100, but metadata.sampleSize is 127"
        );
    }
}
