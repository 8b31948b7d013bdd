//! Write operations on the `files` table.

use rusqlite::{Connection, params, params_from_iter};
use scene_vault_catalog::{CatalogRecord, join_names};
use thiserror::Error;

use crate::update::{UpdateStatement, timestamp};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Record not found: {0}")]
    NotFound(String),
}

fn to_i64(v: Option<u64>) -> Option<i64> {
    v.map(|n| i64::try_from(n).unwrap_or(i64::MAX))
}

fn joined(names: &[String]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(join_names(names))
    }
}

/// Insert a new record. Returns the assigned row id.
///
/// Records are normally created by the upload pipeline; this exists for
/// seeding and tests.
pub fn insert_record(conn: &Connection, record: &CatalogRecord) -> Result<i64, OperationError> {
    let id = if record.id > 0 { Some(record.id) } else { None };
    conn.execute(
        "INSERT INTO files (id, uuid, production_id, cross_ref_id, filename, file_size,
             member_listing, weak_hash, strong_hash, last_modified, platform, section,
             launch_binary, readme_file, title, group_for, group_by,
             text_credits, code_credits, art_credits, audio_credits)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20, ?21)",
        params![
            id,
            record.uuid,
            to_i64(record.production_id),
            to_i64(record.cross_ref_id),
            record.filename,
            to_i64(record.file_size),
            record.member_listing,
            record.weak_hash,
            record.strong_hash,
            record.last_modified.map(timestamp),
            record.platform,
            record.section,
            record.launch_binary,
            record.readme_file,
            record.title,
            record.group_for,
            record.group_by,
            joined(&record.credits.text),
            joined(&record.credits.code),
            joined(&record.credits.art),
            joined(&record.credits.audio),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Execute a built update. An empty statement is a no-op returning 0.
pub fn execute_update(conn: &Connection, stmt: &UpdateStatement) -> Result<usize, OperationError> {
    if stmt.is_empty() {
        return Ok(0);
    }
    let changed = conn.execute(&stmt.sql(), params_from_iter(stmt.params()))?;
    if changed == 0 {
        return Err(OperationError::NotFound(stmt.id.to_string()));
    }
    Ok(changed)
}
