//! SQLite post store
//!
//! One row per recorded post. Existence checks for a batch of ids are a
//! single `IN (...)` query.

use crate::store::schema::initialize_schema;
use crate::store::{PostStore, StoreError, StoreResult};
use crate::strategy::CandidateId;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed post store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens or creates the database at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Database opened and schema in place
    /// * `Err(StoreError)` - Failed to open or initialize the database
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection lock poisoned".to_string()))
    }

    /// Records a fetched post
    ///
    /// Returns false if the id was already present; the stored row is kept.
    pub fn record(&self, candidate: &CandidateId) -> StoreResult<bool> {
        let now = Utc::now().to_rfc3339();
        let inserted = self.conn()?.execute(
            "INSERT OR IGNORE INTO posts (id, url, recorded_at) VALUES (?1, ?2, ?3)",
            params![candidate.id, candidate.url, now],
        )?;
        Ok(inserted > 0)
    }

    /// Number of recorded posts
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl PostStore for SqliteStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        let found: i64 = self.conn()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }

    fn exists_batch(&self, ids: &[&str]) -> StoreResult<HashSet<String>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id FROM posts WHERE id IN ({})", placeholders);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| row.get::<_, String>(0))?;

        let mut found = HashSet::new();
        for id in rows {
            found.insert(id?);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn candidate(id: &str) -> CandidateId {
        CandidateId::new(format!("https://www.reddit.com/comments/{}", id), id)
    }

    #[test]
    fn test_record_and_exists() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert!(!store.exists("abc").unwrap());

        assert!(store.record(&candidate("abc")).unwrap());
        assert!(!store.record(&candidate("abc")).unwrap());

        assert!(store.exists("abc").unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_exists_batch() {
        let store = SqliteStore::new_in_memory().unwrap();
        for id in ["a", "c", "e"] {
            store.record(&candidate(id)).unwrap();
        }

        let found = store.exists_batch(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains("a"));
        assert!(found.contains("c"));

        assert!(store.exists_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.record(&candidate("kept")).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert!(store.exists("kept").unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }
}
