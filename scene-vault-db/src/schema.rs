//! Catalog schema and its upgrade path.
//!
//! The schema version lives in SQLite's `user_version` pragma. Version 1
//! catalogs predate the cross-reference column.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog schema v{found} is newer than this build (v{supported})")]
    TooNew { supported: i32, found: i32 },
}

pub const SCHEMA_VERSION: i32 = 2;

/// Upgrade steps, indexed by the version they lead to.
const UPGRADES: &[(i32, &str)] = &[(2, "ALTER TABLE files ADD COLUMN cross_ref_id INTEGER;")];

/// Open a catalog file, creating or upgrading its schema as needed.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    prepare(&conn)?;
    Ok(conn)
}

/// In-memory catalog with the current schema.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn user_version(conn: &Connection) -> Result<i32, SchemaError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn prepare(conn: &Connection) -> Result<(), SchemaError> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(SchemaError::TooNew {
            supported: SCHEMA_VERSION,
            found,
        });
    }
    if found == 0 {
        conn.execute_batch(FILES_TABLE)?;
    } else {
        for (to, sql) in UPGRADES.iter().filter(|(to, _)| *to > found) {
            log::info!("upgrading catalog schema to v{to}");
            conn.execute_batch(sql)?;
        }
    }
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

const FILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid TEXT NOT NULL UNIQUE,
    production_id INTEGER,
    cross_ref_id INTEGER,
    filename TEXT,
    file_size INTEGER,
    member_listing TEXT,
    weak_hash TEXT,
    strong_hash TEXT,
    last_modified TEXT,
    platform TEXT,
    section TEXT,
    launch_binary TEXT,
    readme_file TEXT,
    title TEXT,
    group_for TEXT,
    group_by TEXT,
    text_credits TEXT,
    code_credits TEXT,
    art_credits TEXT,
    audio_credits TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT,
    updated_by TEXT,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_files_production ON files(production_id);
CREATE INDEX IF NOT EXISTS idx_files_live ON files(deleted_at) WHERE deleted_at IS NULL;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_is_current() {
        let conn = open_memory().unwrap();
        assert_eq!(user_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn v1_catalog_gains_cross_ref_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE files (id INTEGER PRIMARY KEY, uuid TEXT NOT NULL UNIQUE, production_id INTEGER);
                 PRAGMA user_version = 1;",
            )
            .unwrap();
        }
        let conn = open_database(&path).unwrap();
        conn.execute("UPDATE files SET cross_ref_id = 5", []).unwrap();
        assert_eq!(user_version(&conn).unwrap(), 2);
    }

    #[test]
    fn newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("PRAGMA user_version = 9;")
            .unwrap();
        assert!(matches!(
            open_database(&path),
            Err(SchemaError::TooNew { found: 9, .. })
        ));
    }
}
