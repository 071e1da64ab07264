//! Sanity checks for a loaded configuration.

use anyhow::Result;

use super::defaults::{RulePolicy, SourcePolicy};
use crate::rules::RULE_NAMES;

impl RulePolicy {
    /// Reject policies no document could ever satisfy
    pub fn validate(&self) -> Result<()> {
        if self.min_sample_size > self.max_sample_size {
            anyhow::bail!(
                "rules.min_sample_size ({}) must not exceed rules.max_sample_size ({})",
                self.min_sample_size,
                self.max_sample_size
            );
        }

        if self.choice_options == 0 {
            anyhow::bail!("rules.choice_options must be greater than 0");
        }

        if matches!(self.expected_questions, Some(0)) {
            anyhow::bail!("rules.expected_questions must be greater than 0 (use null to disable)");
        }

        if matches!(self.expected_results, Some(0)) {
            anyhow::bail!("rules.expected_results must be greater than 0 (use null to disable)");
        }

        for (name, value) in [
            ("percentage_tolerance", self.percentage_tolerance),
            ("distribution_tolerance", self.distribution_tolerance),
            ("consistency_tolerance", self.consistency_tolerance),
            ("result_tolerance", self.result_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("rules.{} must be a non-negative number, got {}", name, value);
            }
        }

        for rule in &self.disable {
            if !RULE_NAMES.contains(&rule.as_str()) {
                anyhow::bail!(
                    "rules.disable: unknown rule '{}' (known rules: {})",
                    rule,
                    RULE_NAMES.join(", ")
                );
            }
        }

        self.sources.validate()
    }
}

impl SourcePolicy {
    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            anyhow::bail!(
                "rules.sources.min_year ({}) must not exceed rules.sources.max_year ({})",
                self.min_year,
                self.max_year
            );
        }

        if self.accepted_schemes.is_empty() {
            anyhow::bail!("rules.sources.accepted_schemes must list at least one scheme");
        }

        Ok(())
    }
}
