use crate::store::{PostStore, StoreResult};
use std::collections::HashSet;

/// Post store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ids: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Records an id; returns false if it was already present
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl PostStore for MemoryStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.ids.contains(id))
    }

    fn exists_batch(&self, ids: &[&str]) -> StoreResult<HashSet<String>> {
        Ok(ids
            .iter()
            .filter(|id| self.ids.contains(**id))
            .map(|id| id.to_string())
            .collect())
    }
}
