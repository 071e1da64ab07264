//! Validation report rendering.
//!
//! Turns the outcome of a validation run into human-readable text (colored,
//! one section per rule followed by sources and statistics) or into JSON for
//! tooling. The exit status is decided here as well: only hard diagnostics
//! fail a run.

use colored::Colorize;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::diagnostic::{Diagnostic, Diagnostics, Severity};
use crate::schema::StructuralError;
use crate::score::ScoreModel;
use crate::survey::{Source, SurveyDocument};
use crate::ui::{self, colors};

/// Per-rule tally shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub rule: &'static str,
    /// Items the rule looked at (questions, results, sources...)
    pub checked: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl RuleSummary {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Aggregate facts about the survey
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub question_count: usize,
    pub choice_count: usize,
    pub likert_count: usize,
    pub unknown_count: usize,
    pub min_score: i64,
    pub max_score: i64,
    pub min_score_definition: String,
    pub sample_size: u64,
    pub research_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

impl Statistics {
    /// One-line question breakdown, e.g. `6 questions (4 choice, 2 likert)`
    pub fn question_line(&self) -> String {
        let noun = if self.question_count == 1 {
            "question"
        } else {
            "questions"
        };
        let mut line = format!(
            "{} {} ({} choice, {} likert",
            self.question_count, noun, self.choice_count, self.likert_count
        );
        if self.unknown_count > 0 {
            line.push_str(&format!(", {} unknown", self.unknown_count));
        }
        line.push(')');
        line
    }
}

/// Everything needed to render the outcome of a rule run
pub struct Report<'a> {
    pub doc: &'a SurveyDocument,
    pub score: &'a ScoreModel,
    pub diagnostics: &'a Diagnostics,
    pub max_examples: usize,
}

impl<'a> Report<'a> {
    pub fn new(
        doc: &'a SurveyDocument,
        score: &'a ScoreModel,
        diagnostics: &'a Diagnostics,
        config: &ReportConfig,
    ) -> Self {
        Self {
            doc,
            score,
            diagnostics,
            max_examples: config.max_examples,
        }
    }

    pub fn passed(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// 0 when no hard diagnostic was recorded, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    /// Rules that ran, in evaluation order, with their tallies
    pub fn rule_summaries(&self) -> Vec<RuleSummary> {
        self.diagnostics
            .rules_run()
            .iter()
            .map(|&(rule, checked)| {
                let (errors, warnings) =
                    self.diagnostics
                        .for_rule(rule)
                        .fold((0, 0), |(e, w), d| match d.severity {
                            Severity::Error => (e + 1, w),
                            Severity::Warning => (e, w + 1),
                        });
                RuleSummary {
                    rule,
                    checked,
                    errors,
                    warnings,
                }
            })
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        let metadata = &self.doc.metadata;
        let demographics = metadata.demographics.as_ref();

        Statistics {
            question_count: self.score.question_count(),
            choice_count: self.score.choice_count,
            likert_count: self.score.likert_count,
            unknown_count: self.score.unknown_count,
            min_score: self.score.min_possible,
            max_score: self.score.max_possible,
            min_score_definition: self.score.min_definition.to_string(),
            sample_size: metadata.sample_size,
            research_date: metadata.research_date.clone(),
            age_range: demographics.and_then(|d| d.age_range.clone()),
            countries: demographics
                .and_then(|d| d.countries.clone())
                .unwrap_or_default(),
        }
    }

    /// Machine-readable form of the report
    pub fn to_json(&self) -> serde_json::Value {
        let diagnostics: Vec<&Diagnostic> = self.diagnostics.iter().collect();

        serde_json::json!({
            "id": self.doc.id,
            "title": self.doc.title,
            "topic": self.doc.topic,
            "passed": self.passed(),
            "errorCount": self.diagnostics.error_count(),
            "warningCount": self.diagnostics.warning_count(),
            "rules": self.rule_summaries(),
            "diagnostics": diagnostics,
            "sources": self.doc.metadata.data_source,
            "statistics": self.statistics(),
        })
    }
}

/// Format every structural error with its field path
pub fn format_structural(errors: &[StructuralError]) -> String {
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let mut output = vec![format!(
        "{} {}",
        ui::verdict_icon(false),
        colors::error(&format!(
            "Schema validation failed ({} {})",
            errors.len(),
            noun
        ))
        .bold()
    )];

    for error in errors {
        output.push(format!(
            "  {} {}",
            colors::identifier(&error.path),
            error.message
        ));
    }

    output.join("\n")
}

/// Format the report as multi-section text output
pub fn format_report(report: &Report<'_>) -> String {
    let doc = report.doc;
    let mut output = vec![
        format!(
            "{} {}",
            colors::heading(&doc.title),
            colors::secondary(&format!("({})", doc.id))
        ),
        String::new(),
    ];

    // Rules section
    output.push(colors::heading("Rules").to_string());
    output.push(ui::format::underline("Rules"));
    for summary in report.rule_summaries() {
        output.push(format_rule_line(&summary));

        let findings: Vec<&Diagnostic> = report.diagnostics.for_rule(summary.rule).collect();
        for diag in findings.iter().take(report.max_examples) {
            output.push(format!("      {}", diag.display_line()));
        }
        if findings.len() > report.max_examples {
            let remaining = findings.len() - report.max_examples;
            output.push(colors::secondary(&format!("      ... and {} more", remaining)).to_string());
        }
    }
    output.push(String::new());

    // Sources section
    output.push(colors::heading("Sources").to_string());
    output.push(ui::format::underline("Sources"));
    if doc.metadata.data_source.is_empty() {
        output.push(colors::secondary("  (no sources listed)").to_string());
    } else {
        for (idx, source) in doc.metadata.data_source.iter().enumerate() {
            output.extend(format_source(idx, source));
        }
    }
    output.push(String::new());

    // Statistics section
    let stats = report.statistics();
    output.push(colors::heading("Statistics").to_string());
    output.push(ui::format::underline("Statistics"));
    output.push(format!("  {:<15} {}", "Topic:", doc.topic));
    output.push(format!("  {:<15} {}", "Questions:", stats.question_line()));
    output.push(format!(
        "  {:<15} {}-{} {}",
        "Score range:",
        stats.min_score,
        stats.max_score,
        colors::secondary(&format!("(minimum: {})", stats.min_score_definition))
    ));
    output.push(format!(
        "  {:<15} {} participants",
        "Sample size:", stats.sample_size
    ));
    output.push(format!("  {:<15} {}", "Research date:", stats.research_date));
    if let Some(age_range) = &stats.age_range {
        output.push(format!("  {:<15} {}", "Demographics:", age_range));
    }
    if !stats.countries.is_empty() {
        output.push(format!("  {:<15} {}", "Countries:", stats.countries.join(", ")));
    }
    output.push(String::new());

    output.push(format_banner(report));

    output.join("\n")
}

fn format_rule_line(summary: &RuleSummary) -> String {
    let icon = if !summary.passed() {
        ui::severity_icon(Severity::Error)
    } else if summary.warnings > 0 {
        ui::severity_icon(Severity::Warning)
    } else {
        ui::verdict_icon(true)
    };

    let mut counts = format!("{} checked", summary.checked);
    if summary.errors > 0 {
        counts.push_str(&format!(", {} failed", summary.errors));
    }
    if summary.warnings > 0 {
        counts.push_str(&format!(", {} warnings", summary.warnings));
    }

    format!(
        "  {} {:<26} {}",
        icon,
        summary.rule,
        colors::secondary(&counts)
    )
}

fn format_source(idx: usize, source: &Source) -> Vec<String> {
    vec![
        format!("  {}. {} ({})", idx + 1, source.name, source.year),
        format!("     {}", colors::secondary(&source.url)),
    ]
}

fn format_banner(report: &Report<'_>) -> String {
    let warnings = report.diagnostics.warning_count();
    if report.passed() {
        if warnings == 0 {
            return format!(
                "{} {}",
                ui::verdict_icon(true),
                colors::success("All checks passed").bold()
            );
        }
        let text = format!("All checks passed ({} warnings)", warnings);
        format!("{} {}", ui::verdict_icon(true), colors::warning(&text).bold())
    } else {
        let text = format!(
            "Validation failed: {} errors, {} warnings",
            report.diagnostics.error_count(),
            warnings
        );
        format!("{} {}", ui::verdict_icon(false), colors::error(&text).bold())
    }
}
