//! Survey list index.
//!
//! The index is the `surveys-list.json` file the site's landing page reads:
//! one summary entry per survey, sorted by slug, plus the date of the last
//! update and the entry count. It is kept behind the [`IndexStore`] trait so
//! the commands can run against the JSON file or an in-memory store.

mod in_memory;
mod index_store;

pub use in_memory::InMemoryIndexStore;
pub use index_store::{IndexStore, JsonIndexStore};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::survey;

/// Summary of one survey as listed on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
    pub topic: String,
    pub description: String,
    pub metadata: EntryMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    pub sample_size: u64,
}

impl IndexEntry {
    /// Build an entry from a raw survey document.
    ///
    /// The document is not validated here; absent or mistyped fields fall back
    /// to empty text and a zero sample size.
    pub fn from_value(slug: &str, doc: &serde_json::Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let sample_size = doc
            .pointer("/metadata/sampleSize")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        Self {
            slug: slug.to_string(),
            title: text("title"),
            topic: text("topic"),
            description: text("description"),
            metadata: EntryMetadata { sample_size },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyIndex {
    pub surveys: Vec<IndexEntry>,
    /// Date of the last change, `YYYY-MM-DD`
    pub last_updated: String,
    pub total_count: usize,
}

impl Default for SurveyIndex {
    fn default() -> Self {
        Self {
            surveys: Vec::new(),
            last_updated: today(),
            total_count: 0,
        }
    }
}

impl SurveyIndex {
    /// Build an index from a set of entries
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        let mut index = Self {
            surveys: entries,
            ..Self::default()
        };
        index.normalize();
        index
    }

    /// Insert an entry, replacing any existing entry with the same slug
    pub fn upsert(&mut self, entry: IndexEntry) {
        match self.surveys.iter_mut().find(|e| e.slug == entry.slug) {
            Some(existing) => *existing = entry,
            None => self.surveys.push(entry),
        }
        self.last_updated = today();
        self.normalize();
    }

    pub fn get(&self, slug: &str) -> Option<&IndexEntry> {
        self.surveys.iter().find(|e| e.slug == slug)
    }

    fn normalize(&mut self) {
        self.surveys.sort_by(|a, b| a.slug.cmp(&b.slug));
        self.total_count = self.surveys.len();
    }
}

/// Current UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// List `*.json` files directly inside `surveys_dir`, sorted by path
pub fn survey_files(surveys_dir: &Path) -> Result<Vec<PathBuf>> {
    if !surveys_dir.is_dir() {
        anyhow::bail!("Surveys directory not found: {}", surveys_dir.display());
    }

    let pattern = surveys_dir.join("*.json");
    let pattern = pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid survey file pattern")? {
        files.push(entry.context("Failed to read surveys directory entry")?);
    }
    files.sort();

    Ok(files)
}

/// Scan every survey file and build a fresh index.
///
/// Any unreadable or unparseable file aborts the rebuild.
pub fn rebuild(surveys_dir: &Path) -> Result<SurveyIndex> {
    let mut entries = Vec::new();

    for path in survey_files(surveys_dir)? {
        let Some(slug) = survey::slug_from_path(&path) else {
            tracing::warn!(path = %path.display(), "skipping survey file without a usable name");
            continue;
        };

        let doc = survey::load_value(&path)?;
        tracing::debug!(slug = %slug, "indexed survey");
        entries.push(IndexEntry::from_value(&slug, &doc));
    }

    Ok(SurveyIndex::from_entries(entries))
}

/// Outcome of [`record`]
#[derive(Debug)]
pub struct Recorded {
    pub index: SurveyIndex,
    /// Whether an entry with the same slug was already listed
    pub replaced: bool,
}

/// Upsert one entry into the stored index and save it back.
pub fn record<S: IndexStore + ?Sized>(store: &S, entry: IndexEntry) -> Result<Recorded> {
    let mut index = store.load()?;
    let replaced = index.get(&entry.slug).is_some();
    tracing::debug!(slug = %entry.slug, replaced, "recording index entry");

    index.upsert(entry);
    store.save(&index)?;
    Ok(Recorded { index, replaced })
}

/// Rebuild the index from `surveys_dir` and replace the stored one.
///
/// Nothing is saved when any survey file cannot be read.
pub fn rebuild_into<S: IndexStore + ?Sized>(store: &S, surveys_dir: &Path) -> Result<SurveyIndex> {
    let index = rebuild(surveys_dir)?;
    store.save(&index)?;
    Ok(index)
}
