//! `surveyor validate`: check one survey file and report.

use anyhow::{Context, Result};
use std::path::Path;

use surveyor::config::Config;
use surveyor::report::{self, Report};
use surveyor::validation::{self, Validation};

use crate::cli::OutputFormat;

pub fn cmd_validate(path: &Path, format: OutputFormat, config: &Config) -> Result<i32> {
    if !path.exists() {
        anyhow::bail!("Survey file not found: {}", path.display());
    }

    let checker = super::load_schema(config)?;
    let (_, outcome) = validation::validate_file(path, &checker, &config.rules)?;

    match format {
        OutputFormat::Text => print_text(&outcome, config),
        OutputFormat::Json => print_json(&outcome, config)?,
    }

    Ok(if outcome.passed() { 0 } else { 1 })
}

/// Print the outcome as the colored text report
pub fn print_text(outcome: &Validation, config: &Config) {
    match outcome {
        Validation::Structural(errors) => println!("{}", report::format_structural(errors)),
        Validation::Checked {
            doc,
            score,
            diagnostics,
        } => {
            let report = Report::new(doc, score, diagnostics, &config.report);
            println!("{}", report::format_report(&report));
        }
    }
}

fn print_json(outcome: &Validation, config: &Config) -> Result<()> {
    let value = match outcome {
        Validation::Structural(errors) => serde_json::json!({
            "passed": false,
            "structuralErrors": errors,
        }),
        Validation::Checked {
            doc,
            score,
            diagnostics,
        } => Report::new(doc, score, diagnostics, &config.report).to_json(),
    };

    let text = serde_json::to_string_pretty(&value).context("Failed to serialize report")?;
    println!("{}", text);
    Ok(())
}
