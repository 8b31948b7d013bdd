//! scene-vault CLI
//!
//! Reconciles a scene file catalog with the Demozoo production database and
//! inspects local archives.

mod cli_types;
mod commands;
mod error;
mod logging;
mod status;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
use scene_vault_sync::Settings;

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    if let Some(db) = cli.db {
        settings.database = db;
    }
    if let Some(downloads) = cli.downloads {
        settings.downloads = downloads;
    }
    let quiet = cli.quiet;

    match cli.command {
        Commands::Sync { key, write } => commands::sync::run_sync(&settings, &key, write, quiet),
        Commands::SyncAll { all, force, write } => {
            commands::sync::run_sync_all(&settings, all, force, write, quiet)
        }
        Commands::Refresh { dry_run } => commands::sync::run_refresh(&settings, dry_run, quiet),
        Commands::Releaser { id } => commands::releaser::run_releaser(&settings, id),
        Commands::Classify {
            archive,
            name,
            group,
            no_launcher,
        } => commands::classify::run_classify(&archive, name, &group, no_launcher),
        Commands::Extract {
            archive,
            member,
            dest,
            name,
        } => commands::classify::run_extract(&archive, &member, dest, name),
        Commands::Init => commands::config::run_init(&settings),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
