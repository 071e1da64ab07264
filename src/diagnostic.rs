//! Rule diagnostics and the collector the rule engine writes into.

use colored::Colorize;
use serde::{Serialize, Serializer};

/// Severity level for a rule diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory - reported, never changes the exit code
    Warning,
    /// Hard failure - the document is rejected
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Where in the document a diagnostic points.
///
/// Indices are stored zero-based and displayed one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Document,
    Metadata,
    Question { question: usize },
    QuestionOption { question: usize, option: usize },
    Result { result: usize },
    Source { source: usize },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Document => write!(f, "document"),
            Location::Metadata => write!(f, "metadata"),
            Location::Question { question } => write!(f, "question {}", question + 1),
            Location::QuestionOption { question, option } => {
                write!(f, "question {}, option {}", question + 1, option + 1)
            }
            Location::Result { result } => write!(f, "result {}", result + 1),
            Location::Source { source } => write!(f, "source {}", source + 1),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single reported defect
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this diagnostic
    pub rule: &'static str,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the diagnostic as a single colored line
    pub fn display_line(&self) -> String {
        format!(
            "{} {}: {}",
            crate::ui::severity_icon(self.severity),
            self.location.to_string().cyan(),
            self.message
        )
    }
}

/// Collector shared by all rules.
///
/// Rules only ever append; nothing is removed or reordered, so the output
/// follows rule evaluation order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    /// Rules that ran, in evaluation order, with how many items each checked
    checked: Vec<(&'static str, usize)>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, rule: &'static str, location: Location, message: impl Into<String>) {
        self.push(rule, Severity::Error, location, message);
    }

    pub fn warning(&mut self, rule: &'static str, location: Location, message: impl Into<String>) {
        self.push(rule, Severity::Warning, location, message);
    }

    pub fn push(
        &mut self,
        rule: &'static str,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) {
        self.items.push(Diagnostic {
            rule,
            severity,
            location,
            message: message.into(),
        });
    }

    /// Record that a rule ran over `count` items (questions, results, sources...)
    pub fn record_rule(&mut self, rule: &'static str, count: usize) {
        self.checked.push((rule, count));
    }

    pub fn rules_run(&self) -> &[(&'static str, usize)] {
        &self.checked
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn for_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.items.iter().filter(move |d| d.rule == rule)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if any hard failure was recorded
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.is_error())
    }
}
