//! Metadata rules: sample size plausibility and data source hygiene.

use std::collections::HashSet;

use super::{RuleContext, SAMPLE_SIZE, SOURCES};
use crate::diagnostic::{Diagnostics, Location};

/// Number of distinct decimal digits in `n` (`127` -> 3, `200` -> 2, `111` -> 1)
pub(crate) fn distinct_digits(n: u64) -> usize {
    n.to_string().chars().collect::<HashSet<_>>().len()
}

pub(super) fn check_sample_size(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    diags.record_rule(SAMPLE_SIZE, 1);

    let size = ctx.doc.metadata.sample_size;
    let (min, max) = (ctx.policy.min_sample_size, ctx.policy.max_sample_size);

    if size < min || size > max {
        diags.error(
            SAMPLE_SIZE,
            Location::Metadata,
            format!("sampleSize {} is outside the allowed range {}-{}", size, min, max),
        );
    }

    // Round or repeated numbers read as invented
    if distinct_digits(size) < 2 {
        diags.error(
            SAMPLE_SIZE,
            Location::Metadata,
            format!(
                "sampleSize {} must contain at least two distinct digits",
                size
            ),
        );
    }
}

pub(super) fn check_sources(ctx: &RuleContext<'_>, diags: &mut Diagnostics) {
    let sources = &ctx.doc.metadata.data_source;
    let policy = &ctx.policy.sources;
    diags.record_rule(SOURCES, sources.len());

    if sources.is_empty() {
        diags.warning(SOURCES, Location::Metadata, "no data sources listed");
        return;
    }

    for (idx, source) in sources.iter().enumerate() {
        let location = Location::Source { source: idx };
        let url = source.url.trim();

        if !policy
            .accepted_schemes
            .iter()
            .any(|scheme| url.starts_with(scheme.as_str()))
        {
            diags.push(
                SOURCES,
                policy.url_severity,
                location,
                format!(
                    "URL '{}' should start with {}",
                    url,
                    policy.accepted_schemes.join(" or ")
                ),
            );
        } else if let Err(e) = url::Url::parse(url) {
            diags.push(
                SOURCES,
                policy.url_severity,
                location,
                format!("URL '{}' is not well-formed: {}", url, e),
            );
        }

        let lowered = url.to_lowercase();
        if let Some(pattern) = policy
            .placeholder_patterns
            .iter()
            .find(|p| lowered.contains(&p.to_lowercase()))
        {
            diags.push(
                SOURCES,
                policy.placeholder_severity,
                location,
                format!("URL '{}' looks like a placeholder (matches '{}')", url, pattern),
            );
        }

        if source.year < policy.min_year || source.year > policy.max_year {
            diags.push(
                SOURCES,
                policy.year_severity,
                location,
                format!(
                    "year {} of '{}' is outside {}-{}",
                    source.year, source.name, policy.min_year, policy.max_year
                ),
            );
        }
    }
}
