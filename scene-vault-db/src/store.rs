//! The persistence collaborator seen by the reconciliation engine.

use rusqlite::Connection;
use scene_vault_catalog::{CatalogRecord, RecordKey};

use crate::operations::{self, OperationError};
use crate::queries::{self, ScanFilter};
use crate::update::UpdateStatement;

/// Row scans plus one parameterised mutation per call.
pub trait CatalogStore {
    fn scan(&self, filter: ScanFilter) -> Result<Vec<CatalogRecord>, OperationError>;

    fn find(&self, key: &RecordKey) -> Result<Option<CatalogRecord>, OperationError>;

    fn find_by_production(&self, production_id: u64)
    -> Result<Vec<CatalogRecord>, OperationError>;

    /// Run one update, returning the affected row count.
    fn execute(&self, stmt: &UpdateStatement) -> Result<usize, OperationError>;
}

/// [`CatalogStore`] backed by a SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CatalogStore for SqliteStore {
    fn scan(&self, filter: ScanFilter) -> Result<Vec<CatalogRecord>, OperationError> {
        queries::scan_records(&self.conn, filter)
    }

    fn find(&self, key: &RecordKey) -> Result<Option<CatalogRecord>, OperationError> {
        queries::find_record(&self.conn, key)
    }

    fn find_by_production(
        &self,
        production_id: u64,
    ) -> Result<Vec<CatalogRecord>, OperationError> {
        queries::find_by_production(&self.conn, production_id)
    }

    fn execute(&self, stmt: &UpdateStatement) -> Result<usize, OperationError> {
        operations::execute_update(&self.conn, stmt)
    }
}
