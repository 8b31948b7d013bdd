use std::fs;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use scene_vault_sync::{Settings, settings_path};

use crate::CliError;

/// Show the effective settings, after command-line overrides.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "scene-vault Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let text = settings.to_toml()?;
    for line in text.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Create the catalog database (with schema) and the download directory.
pub(crate) fn run_init(settings: &Settings) -> Result<(), CliError> {
    if let Some(parent) = settings.database.parent() {
        fs::create_dir_all(parent)?;
    }
    let existed = settings.database.exists();
    scene_vault_db::open_database(&settings.database)
        .map_err(|e| CliError::database(format!("Failed to create catalog database: {e}")))?;
    fs::create_dir_all(&settings.downloads)?;

    let state = if existed { "(exists)" } else { "(created)" };
    log::info!(
        "  Database:  {} {}",
        settings.database.display(),
        state.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Downloads: {}", settings.downloads.display());

    let path = settings_path();
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, settings.to_toml()?)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))?;
        log::info!("  Settings:  {} (written)", path.display());
    }
    Ok(())
}
