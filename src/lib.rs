//! # Surveyor - survey validation and page generation
//!
//! Surveyor checks survey-definition documents (JSON) and turns the ones that
//! pass into self-contained interactive HTML pages.
//!
//! ## Overview
//!
//! Validation is layered. A document must first conform to a fixed JSON
//! schema; only then is it scored and run through the consistency rules
//! (percentage sums, distribution agreement, percentile order, score range
//! continuity, source plausibility). Every rule runs, so one invocation
//! reports every defect at once.
//!
//! ## Modules
//!
//! - [`survey`] - Typed survey document model
//! - [`schema`] - JSON Schema conformance
//! - [`score`] - Derived scoring facts (achievable range, result bands)
//! - [`rules`] - Consistency rule engine
//! - [`diagnostic`] - Rule findings and their collector
//! - [`validation`] - The full pipeline for one document
//! - [`report`] - Text and JSON rendering of a validation outcome
//! - [`config`] - Project configuration (`.surveyor/config.md`)
//! - [`index`] - The survey list consumed by the landing page
//! - [`site`] - Interactive page rendering
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use surveyor::config::Config;
//! use surveyor::schema::SchemaChecker;
//! use surveyor::validation::{validate_file, Validation};
//!
//! let config = Config::load(Path::new(".surveyor/config.md")).expect("Failed to load config");
//! let checker = SchemaChecker::load(&config.schema_path()).expect("Failed to load schema");
//!
//! let (_, outcome) = validate_file(Path::new("surveys/sleep-habits.json"), &checker, &config.rules)
//!     .expect("Failed to read survey");
//!
//! match outcome {
//!     Validation::Structural(errors) => println!("{} schema errors", errors.len()),
//!     Validation::Checked { diagnostics, .. } => println!("{} findings", diagnostics.len()),
//! }
//! ```

pub mod config;
pub mod diagnostic;
pub mod index;
pub mod report;
pub mod rules;
pub mod schema;
pub mod score;
pub mod site;
pub mod survey;
pub mod ui;
pub mod validation;
