//! Command module structure for surveyor CLI

use anyhow::Result;
use std::path::Path;

use surveyor::config::Config;
use surveyor::schema::SchemaChecker;

pub mod generate;
pub mod index;
pub mod util;
pub mod validate;

/// Load the project config, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load(path)
}

/// Compile the schema named by the config.
///
/// A missing or malformed schema is a pre-condition failure, not a property of
/// the survey being checked.
pub fn load_schema(config: &Config) -> Result<SchemaChecker> {
    let path = config.schema_path();
    tracing::debug!(path = %path.display(), "loading schema");
    SchemaChecker::load(&path)
}
