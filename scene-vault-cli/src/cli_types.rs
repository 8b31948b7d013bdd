//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scene-vault")]
#[command(about = "Reconcile a scene file catalog with Demozoo", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Catalog database (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Artifact download directory (overrides settings.toml)
    #[arg(long, global = true)]
    pub downloads: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by the commands that write records.
#[derive(Args, Clone, Copy)]
pub(crate) struct WriteArgs {
    /// Re-run archive classification and replace stored launcher/readme
    #[arg(long)]
    pub overwrite: bool,

    /// Show what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Reconcile a single record by id or uuid
    Sync {
        /// Numeric record id or uuid
        key: String,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Reconcile every linked record with missing artifact data
    SyncAll {
        /// Visit every linked record, not only incomplete ones
        #[arg(long)]
        all: bool,

        /// Re-download every artifact (implies --all)
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Re-pull titles, credits and cross-references for linked records
    Refresh {
        /// Show what would change without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List a releaser's productions and whether the catalog links them
    Releaser {
        /// Demozoo releaser id
        id: u64,
    },

    /// Pick the readme and launcher inside a local archive
    Classify {
        /// Path to the archive
        archive: PathBuf,

        /// Declared filename (defaults to the archive's file name)
        #[arg(long)]
        name: Option<String>,

        /// Group name to derive filename variants from (repeatable)
        #[arg(long)]
        group: Vec<String>,

        /// Skip launcher selection (non-DOS platforms)
        #[arg(long)]
        no_launcher: bool,
    },

    /// Extract one member from a local archive
    Extract {
        /// Path to the archive
        archive: PathBuf,

        /// Member name as listed in the archive
        member: String,

        /// Destination directory (defaults to the current directory)
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Declared filename (defaults to the archive's file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Create the catalog database and download directory
    Init,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["scene-vault", "sync", "42", "-n", "--db", "x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Commands::Sync { key, write } => {
                assert_eq!(key, "42");
                assert!(write.dry_run);
                assert!(!write.overwrite);
            }
            _ => panic!("expected sync"),
        }
    }

    #[test]
    fn classify_collects_repeated_groups() {
        let cli = Cli::try_parse_from([
            "scene-vault",
            "classify",
            "a.zip",
            "--group",
            "Razor 1911",
            "--group",
            "Fairlight",
        ])
        .unwrap();
        match cli.command {
            Commands::Classify { group, no_launcher, .. } => {
                assert_eq!(group, vec!["Razor 1911", "Fairlight"]);
                assert!(!no_launcher);
            }
            _ => panic!("expected classify"),
        }
    }
}
