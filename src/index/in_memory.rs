use std::cell::RefCell;

use anyhow::Result;

use super::index_store::IndexStore;
use super::SurveyIndex;

/// In-memory implementation of IndexStore for testing.
#[derive(Default)]
pub struct InMemoryIndexStore {
    index: RefCell<Option<SurveyIndex>>,
}

impl InMemoryIndexStore {
    /// Create a new empty InMemoryIndexStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new InMemoryIndexStore holding the given index.
    pub fn with_index(index: SurveyIndex) -> Self {
        Self {
            index: RefCell::new(Some(index)),
        }
    }

    /// Whether anything has been saved yet
    pub fn is_saved(&self) -> bool {
        self.index.borrow().is_some()
    }
}

impl IndexStore for InMemoryIndexStore {
    fn load(&self) -> Result<SurveyIndex> {
        Ok(self.index.borrow().clone().unwrap_or_default())
    }

    fn save(&self, index: &SurveyIndex) -> Result<()> {
        *self.index.borrow_mut() = Some(index.clone());
        Ok(())
    }
}
