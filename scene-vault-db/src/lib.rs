//! SQLite persistence layer for the file catalog.
//!
//! Provides schema creation, row scans, the partial-update statement builder,
//! and the [`CatalogStore`] collaborator used by the reconciliation engine.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;
pub mod update;

pub use operations::{OperationError, execute_update, insert_record};
pub use queries::{ScanFilter, find_by_production, find_record, scan_records};
pub use schema::{SchemaError, open_database, open_memory};
pub use store::{CatalogStore, SqliteStore};
pub use update::{UpdateStatement, build_update};
