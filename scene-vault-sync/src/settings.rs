//! Application settings (database, download directory, remote endpoints).
//!
//! The settings file lives at `~/.config/scene-vault/settings.toml`. Every
//! field is optional in the file; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{SyncConfig, SyncOptions};
use crate::error::SyncError;

const APP_DIR: &str = "scene-vault";

pub const DEFAULT_CATALOG_HOST: &str = "defacto2.net";
pub const DEFAULT_API_BASE: &str = "https://demozoo.org/api/v1";

/// Canonical path to the settings file: `~/.config/scene-vault/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite catalog file.
    pub database: PathBuf,
    /// Artifact directory; one file per record, named by uuid.
    pub downloads: PathBuf,
    pub user_agent: String,
    /// This catalog's own host. Download links pointing here are skipped.
    pub catalog_host: String,
    /// Written to `updated_by` on every update.
    pub actor_id: String,
    pub request_timeout_secs: u64,
    pub download_timeout_secs: u64,
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        let data = data_dir();
        Self {
            database: data.join("catalog.db"),
            downloads: data.join("downloads"),
            user_agent: concat!("scene-vault/", env!("CARGO_PKG_VERSION")).to_string(),
            catalog_host: DEFAULT_CATALOG_HOST.to_string(),
            actor_id: "scene-vault-sync".to_string(),
            request_timeout_secs: 5,
            download_timeout_secs: 600,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Load from the canonical path. A missing file yields the defaults.
    pub fn load() -> Result<Self, SyncError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SyncError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Pretty TOML form, as `config show` prints it.
    pub fn to_toml(&self) -> Result<String, SyncError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs.max(1))
    }

    /// Build the engine configuration for one run.
    pub fn sync_config(&self, options: SyncOptions) -> SyncConfig {
        SyncConfig {
            downloads: self.downloads.clone(),
            catalog_host: self.catalog_host.clone(),
            actor_id: self.actor_id.clone(),
            options,
        }
    }
}
