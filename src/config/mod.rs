//! Configuration management for surveyor projects.
//!
//! The configuration lives in `.surveyor/config.md`: a Markdown file whose
//! YAML frontmatter holds the settings and whose body is free-form notes.
//! The file is optional; every field has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// Default location of the project config file
pub const CONFIG_PATH: &str = ".surveyor/config.md";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub rules: RulePolicy,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load the configuration, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        // An empty frontmatter block means "all defaults"
        let config: Config = if frontmatter.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?
        };

        config.rules.validate()?;

        Ok(config)
    }

    pub fn schema_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.schema)
    }

    pub fn surveys_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.surveys_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.output_dir)
    }

    /// Path of the survey list file (`<output_dir>/<index_file>`)
    pub fn index_path(&self) -> PathBuf {
        self.output_dir().join(&self.paths.index_file)
    }
}

/// Split `---` delimited YAML frontmatter from the rest of a document.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("\n---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 4..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}
