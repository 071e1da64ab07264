use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::SurveyIndex;

/// A trait for loading and saving the survey index from a storage backend.
pub trait IndexStore {
    /// Load the index; a store that holds nothing yet yields an empty index.
    fn load(&self) -> Result<SurveyIndex>;

    /// Replace the stored index.
    fn save(&self, index: &SurveyIndex) -> Result<()>;
}

/// File-based implementation of IndexStore.
pub struct JsonIndexStore {
    path: PathBuf,
}

impl JsonIndexStore {
    /// Create a new JsonIndexStore for the given index file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the index file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for JsonIndexStore {
    fn load(&self) -> Result<SurveyIndex> {
        if !self.path.exists() {
            return Ok(SurveyIndex::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read index file: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse index file: {}", self.path.display()))
    }

    fn save(&self, index: &SurveyIndex) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let json = serde_json::to_string_pretty(index).context("Failed to serialize index")?;

        // Write next to the target and rename over it, so readers never see half a file
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .context("Failed to write index")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write index file: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), entries = index.total_count, "index saved");
        Ok(())
    }
}
