//! Database schema for the post store

/// SQL schema for the post store
pub const SCHEMA_SQL: &str = r#"
-- Posts already harvested and fetched
CREATE TABLE IF NOT EXISTS posts (
    id TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
"#;

/// Creates the tables if they do not exist yet
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
