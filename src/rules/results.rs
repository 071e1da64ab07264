//! Result band rules: count, comparison percentages, percentiles, score ranges
//! and recommendations.

use super::{
    outside_tolerance, pct, RuleContext, PERCENTILE_ORDER, RANGE_BOUNDS, RECOMMENDATIONS,
    RESULT_COUNT, RESULT_PERCENTAGE_SUM,
};
use crate::diagnostic::{Diagnostics, Location};
use crate::score::{ScoreBand, ScoreModel};

pub(super) fn check_result_count(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(RESULT_COUNT, 1);

    let Some(expected) = ctx.policy.expected_results else {
        return;
    };

    let actual = ctx.doc.results.len();
    if actual != expected {
        diags.error(
            RESULT_COUNT,
            Location::Document,
            format!("survey has {} results, expected {}", actual, expected),
        );
    }
}

pub(super) fn check_result_percentage_sum(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(RESULT_PERCENTAGE_SUM, 1);

    let tolerance = ctx.policy.result_tolerance;
    let total: f64 = ctx
        .doc
        .results
        .iter()
        .map(|r| r.real_world_comparison.percentage)
        .sum();

    if outside_tolerance(total, 100.0, tolerance) {
        diags.error(
            RESULT_PERCENTAGE_SUM,
            Location::Document,
            format!(
                "realWorldComparison percentages sum to {}%, expected ~100% (±{})",
                pct(total),
                pct(tolerance)
            ),
        );
    }
}

pub(super) fn check_percentile_order(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let results = &ctx.doc.results;
    diags.record_rule(PERCENTILE_ORDER, results.len());

    for (idx, pair) in results.windows(2).enumerate() {
        let (prev, next) = (pair[0].percentile.value, pair[1].percentile.value);
        if next <= prev {
            diags.error(
                PERCENTILE_ORDER,
                Location::Result { result: idx + 1 },
                format!(
                    "percentile ({}) is not greater than the previous one ({})",
                    pct(next),
                    pct(prev)
                ),
            );
        }
    }
}

pub(super) fn check_range_bounds(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let bands = &ctx.score.bands;
    diags.record_rule(RANGE_BOUNDS, bands.len());

    let (lowest, highest) = (ctx.score.min_possible, ctx.score.max_possible);

    for (idx, band) in bands.iter().enumerate() {
        let location = Location::Result { result: idx };
        let Some(band) = band else {
            diags.error(
                RANGE_BOUNDS,
                location,
                format!(
                    "range '{}' is not of the form \"min-max\"",
                    ctx.doc.results[idx].range
                ),
            );
            continue;
        };

        if band.min > band.max {
            diags.error(
                RANGE_BOUNDS,
                location,
                format!("range {}-{} starts above its end", band.min, band.max),
            );
        }

        if band.min < lowest || band.max > highest {
            diags.error(
                RANGE_BOUNDS,
                location,
                format!(
                    "range {}-{} falls outside the achievable scores {}-{}",
                    band.min, band.max, lowest, highest
                ),
            );
        }
    }

    if ctx.policy.require_contiguous_ranges {
        for (idx, pair) in bands.windows(2).enumerate() {
            let [Some(prev), Some(next)] = pair else {
                continue;
            };
            let expected = prev.max.checked_add(1);
            if expected == Some(next.min) {
                continue;
            }

            let hint = match expected {
                Some(start) => format!("expected to start at {}", start),
                None => "the previous range already ends at the largest score".to_string(),
            };
            diags.error(
                RANGE_BOUNDS,
                Location::Result { result: idx + 1 },
                format!(
                    "range {}-{} does not continue the previous range {}-{} ({})",
                    next.min, next.max, prev.min, prev.max, hint
                ),
            );
        }
    }

    check_coverage(ctx.score, diags);
}

// Scores outside every band leave a respondent without a result on the page
fn check_coverage(score: &ScoreModel, diags: &mut Diagnostics) {
    let (lowest, highest) = (score.min_possible, score.max_possible);
    let parsed: Option<Vec<ScoreBand>> = score.bands.iter().copied().collect();
    let Some(parsed) = parsed else {
        return;
    };
    let (Some(first), Some(last)) = (parsed.first(), parsed.last()) else {
        return;
    };

    if score.band_for(lowest).is_none() {
        if let Some(end) = first.min.checked_sub(1).filter(|end| *end >= lowest) {
            diags.warning(
                RANGE_BOUNDS,
                Location::Document,
                format!("scores {}-{} are not covered by any result", lowest, end),
            );
        }
    }

    if score.band_for(highest).is_none() {
        if let Some(start) = last.max.checked_add(1).filter(|start| *start <= highest) {
            diags.warning(
                RANGE_BOUNDS,
                Location::Document,
                format!("scores {}-{} are not covered by any result", start, highest),
            );
        }
    }
}

pub(super) fn check_recommendations(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let results = &ctx.doc.results;
    diags.record_rule(RECOMMENDATIONS, results.len());
    let min = ctx.policy.min_recommendations;

    for (idx, result) in results.iter().enumerate() {
        let count = result.recommendations.len();
        if count < min {
            diags.error(
                RECOMMENDATIONS,
                Location::Result { result: idx },
                format!("has {} recommendations, expected at least {}", count, min),
            );
        }
    }
}
