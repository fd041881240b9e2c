//! Post store capability
//!
//! The harvester only ever asks one question of persistent state: has this
//! post id been recorded already? [`PostStore`] expresses that, and the
//! backends here answer it.
//!
//! - `SqliteStore`: SQLite-backed store of recorded posts
//! - `MemoryStore`: in-process set of ids

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Existence checks against already-stored posts
pub trait PostStore {
    /// Returns true if a post with this id has been recorded
    fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Returns the subset of `ids` that has been recorded
    ///
    /// The default issues one [`exists`](Self::exists) call per id;
    /// backends override it with a single lookup.
    fn exists_batch(&self, ids: &[&str]) -> StoreResult<HashSet<String>> {
        let mut found = HashSet::new();
        for id in ids {
            if self.exists(id)? {
                found.insert(id.to_string());
            }
        }
        Ok(found)
    }
}

impl<T: PostStore + ?Sized> PostStore for &T {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        (**self).exists(id)
    }

    fn exists_batch(&self, ids: &[&str]) -> StoreResult<HashSet<String>> {
        (**self).exists_batch(ids)
    }
}
