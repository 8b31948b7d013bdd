use scene_vault_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or created
    #[error("Database error: {0}")]
    Database(String),

    /// Reconciliation setup or single-record failure
    #[error("{0}")]
    Sync(#[from] SyncError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Archive inspection error
    #[error("Archive error: {0}")]
    Archive(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }
}
