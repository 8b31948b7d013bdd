use scene_vault_archive::ArchiveError;
use scene_vault_catalog::{ParseKeyError, RecordKey};
use scene_vault_db::OperationError;
use scene_vault_demozoo::DemozooError;

/// Errors raised while reconciling records.
///
/// Inside a batch every variant is caught per record; only errors from the
/// initial scan escape [`crate::Reconciler::reconcile_all`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Database error: {0}")]
    Store(#[from] OperationError),

    #[error("Remote error: {0}")]
    Remote(#[from] DemozooError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record key: {0}")]
    InvalidKey(#[from] ParseKeyError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Releaser {0} not found")]
    ReleaserNotFound(u64),

    #[error("Metadata service unavailable (HTTP {0})")]
    Unavailable(u16),

    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Settings serialization error: {0}")]
    SettingsFormat(#[from] toml::ser::Error),
}

impl SyncError {
    /// Whether the error came from the persistence layer.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Parse a command-line record key (positive id or uuid).
pub fn parse_key(s: &str) -> Result<RecordKey, SyncError> {
    Ok(s.parse::<RecordKey>()?)
}
