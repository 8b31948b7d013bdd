//! Read queries for the catalog database.
//!
//! Every query skips soft-deleted rows and normalises empty strings and zero
//! ids to `None` on the way out.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use scene_vault_catalog::{CatalogRecord, Credits, RecordKey, split_names};

use crate::operations::OperationError;

/// Which rows a batch scan returns. Only linked rows are ever eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFilter {
    /// Linked rows with at least one empty artifact field.
    Incomplete,
    /// Every linked row.
    Linked,
}

const RECORD_COLUMNS: &str = "id, uuid, production_id, cross_ref_id, filename, file_size,
    member_listing, weak_hash, strong_hash, last_modified, platform, section,
    launch_binary, readme_file, title, group_for, group_by,
    text_credits, code_credits, art_credits, audio_credits";

const LINKED: &str = "deleted_at IS NULL AND production_id IS NOT NULL AND production_id > 0";

const INCOMPLETE: &str = "(filename IS NULL OR filename = ''
    OR file_size IS NULL OR file_size = 0
    OR weak_hash IS NULL OR weak_hash = ''
    OR strong_hash IS NULL OR strong_hash = ''
    OR member_listing IS NULL OR member_listing = '')";

/// Scan the rows matching `filter`, ordered by id.
pub fn scan_records(
    conn: &Connection,
    filter: ScanFilter,
) -> Result<Vec<CatalogRecord>, OperationError> {
    let sql = match filter {
        ScanFilter::Incomplete => {
            format!("SELECT {RECORD_COLUMNS} FROM files WHERE {LINKED} AND {INCOMPLETE} ORDER BY id")
        }
        ScanFilter::Linked => {
            format!("SELECT {RECORD_COLUMNS} FROM files WHERE {LINKED} ORDER BY id")
        }
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a single live record by local id or uuid.
pub fn find_record(
    conn: &Connection,
    key: &RecordKey,
) -> Result<Option<CatalogRecord>, OperationError> {
    let result = match key {
        RecordKey::Id(id) => conn.query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM files WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            row_to_record,
        ),
        RecordKey::Uuid(uuid) => conn.query_row(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM files WHERE LOWER(uuid) = LOWER(?1) AND deleted_at IS NULL"
            ),
            params![uuid.to_string()],
            row_to_record,
        ),
    };
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All live records linked to a remote production.
pub fn find_by_production(
    conn: &Connection,
    production_id: u64,
) -> Result<Vec<CatalogRecord>, OperationError> {
    let id = i64::try_from(production_id).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM files WHERE production_id = ?1 AND deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![id], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn opt_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value: Option<String> = row.get(idx)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn opt_id(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u64>> {
    let value: Option<i64> = row.get(idx)?;
    Ok(value.and_then(|v| u64::try_from(v).ok()).filter(|v| *v > 0))
}

fn names(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    Ok(opt_text(row, idx)?
        .map(|s| split_names(&s))
        .unwrap_or_default())
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CatalogRecord> {
    let last_modified = opt_text(row, 9)?.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| log::debug!("Ignoring unparseable last_modified '{s}': {e}"))
            .ok()
    });
    Ok(CatalogRecord {
        id: row.get(0)?,
        uuid: row.get(1)?,
        production_id: opt_id(row, 2)?,
        cross_ref_id: opt_id(row, 3)?,
        filename: opt_text(row, 4)?,
        file_size: opt_id(row, 5)?,
        member_listing: opt_text(row, 6)?,
        weak_hash: opt_text(row, 7)?,
        strong_hash: opt_text(row, 8)?,
        last_modified,
        platform: opt_text(row, 10)?,
        section: opt_text(row, 11)?,
        launch_binary: opt_text(row, 12)?,
        readme_file: opt_text(row, 13)?,
        title: opt_text(row, 14)?,
        group_for: opt_text(row, 15)?,
        group_by: opt_text(row, 16)?,
        credits: Credits {
            text: names(row, 17)?,
            code: names(row, 18)?,
            art: names(row, 19)?,
            audio: names(row, 20)?,
        },
    })
}
