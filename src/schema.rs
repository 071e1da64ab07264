//! Structural conformance of survey documents.
//!
//! Shape and type validity is delegated to a JSON Schema validator compiled
//! from a fixed schema file. Only documents that pass this layer are turned
//! into the typed [`SurveyDocument`] model and handed to the rule engine.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::survey::SurveyDocument;

/// One structural error: where it is and what is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralError {
    /// JSON pointer to the offending value (`/` for the document root)
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// Result of a conformance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conformance {
    Valid,
    Invalid(Vec<StructuralError>),
}

impl Conformance {
    pub fn is_valid(&self) -> bool {
        matches!(self, Conformance::Valid)
    }
}

/// Compiled schema, ready to check any number of documents
pub struct SchemaChecker {
    validator: jsonschema::Validator,
}

impl SchemaChecker {
    /// Load and compile a JSON schema from a file path
    pub fn load(schema_path: &Path) -> Result<Self> {
        let schema_content = fs::read_to_string(schema_path)
            .with_context(|| format!("Failed to read schema file: {}", schema_path.display()))?;

        let schema: serde_json::Value = serde_json::from_str(&schema_content).with_context(|| {
            format!("Failed to parse schema as JSON: {}", schema_path.display())
        })?;

        Self::from_value(&schema)
    }

    pub fn from_value(schema: &serde_json::Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| anyhow::anyhow!("Failed to compile JSON schema: {}", e))?;

        Ok(Self { validator })
    }

    /// Collect every structural error of `instance`, in validator order.
    pub fn check(&self, instance: &serde_json::Value) -> Conformance {
        let errors: Vec<StructuralError> = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                StructuralError {
                    path: if path.is_empty() { "/".to_string() } else { path },
                    message: e.to_string(),
                }
            })
            .collect();

        if errors.is_empty() {
            Conformance::Valid
        } else {
            Conformance::Invalid(errors)
        }
    }

    /// Check conformance and build the typed document.
    ///
    /// A schema that is looser than the model can let through a document the
    /// model cannot represent; that deserialization failure is reported as a
    /// structural error as well.
    pub fn conform(
        &self,
        instance: &serde_json::Value,
    ) -> std::result::Result<SurveyDocument, Vec<StructuralError>> {
        if let Conformance::Invalid(errors) = self.check(instance) {
            return Err(errors);
        }

        <SurveyDocument as serde::Deserialize>::deserialize(instance).map_err(|e| {
            vec![StructuralError {
                path: "/".to_string(),
                message: e.to_string(),
            }]
        })
    }
}
