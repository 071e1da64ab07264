//! The full validation pipeline for one survey document.
//!
//! Schema conformance gates everything else: a structurally invalid document
//! stops here with its structural errors. A conforming document is scored
//! and checked by every enabled consistency rule.

use anyhow::Result;
use std::path::Path;

use crate::config::RulePolicy;
use crate::diagnostic::Diagnostics;
use crate::rules::RuleEngine;
use crate::schema::{SchemaChecker, StructuralError};
use crate::score::ScoreModel;
use crate::survey::{self, SurveyDocument};

/// Outcome of validating a survey document
#[derive(Debug)]
pub enum Validation {
    /// The document does not conform to the schema; no rule ran
    Structural(Vec<StructuralError>),
    /// The document conforms; rules ran and produced `diagnostics`
    Checked {
        doc: Box<SurveyDocument>,
        score: ScoreModel,
        diagnostics: Diagnostics,
    },
}

impl Validation {
    /// True when the document conforms and no hard diagnostic was recorded
    pub fn passed(&self) -> bool {
        match self {
            Validation::Structural(_) => false,
            Validation::Checked { diagnostics, .. } => !diagnostics.has_errors(),
        }
    }
}

/// Validate an already-parsed document
pub fn validate_value(
    value: &serde_json::Value,
    checker: &SchemaChecker,
    policy: &RulePolicy,
) -> Validation {
    let doc = match checker.conform(value) {
        Ok(doc) => doc,
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "document failed schema conformance");
            return Validation::Structural(errors);
        }
    };

    let score = ScoreModel::compute(&doc, policy.min_score_definition);
    let diagnostics = RuleEngine::new(policy).run(&doc, &score);
    tracing::debug!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "rules finished"
    );

    Validation::Checked {
        doc: Box::new(doc),
        score,
        diagnostics,
    }
}

/// Read a survey file and validate it.
///
/// I/O and JSON syntax errors are returned as `Err`; everything about the
/// document's content is reported through [`Validation`].
pub fn validate_file(
    path: &Path,
    checker: &SchemaChecker,
    policy: &RulePolicy,
) -> Result<(serde_json::Value, Validation)> {
    let value = survey::load_value(path)?;
    let outcome = validate_value(&value, checker, policy);
    Ok((value, outcome))
}
