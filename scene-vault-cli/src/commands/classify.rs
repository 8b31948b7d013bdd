use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use scene_vault_archive::{Archiver, ZipArchiver};
use scene_vault_catalog::{classify, group_variants, strip_extension};

use crate::CliError;

/// The declared filename, falling back to the archive's own name.
fn declared_name(archive: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

/// List an archive and show which members would be picked as readme and
/// launcher.
pub(crate) fn run_classify(
    archive: &Path,
    name: Option<String>,
    groups: &[String],
    no_launcher: bool,
) -> Result<(), CliError> {
    let filename = declared_name(archive, name);
    let members = ZipArchiver
        .list(archive, &filename)
        .map_err(|e| CliError::archive(format!("{}: {}", archive.display(), e)))?;

    let mut variants: Vec<String> = Vec::new();
    for group in groups {
        for v in group_variants(group) {
            if !variants.contains(&v) {
                variants.push(v);
            }
        }
    }
    let result = classify(strip_extension(&filename), &members, &variants, !no_launcher);

    log::info!(
        "{} ({} members)",
        filename.if_supports_color(Stdout, |t| t.bold()),
        members.len()
    );
    for member in &members {
        let tag = if result.readme.as_deref() == Some(member.as_str()) {
            "readme"
        } else if result.launcher.as_deref() == Some(member.as_str()) {
            "launch"
        } else {
            ""
        };
        if tag.is_empty() {
            log::info!("          {}", member);
        } else {
            log::info!(
                "  {:<7} {}",
                tag.if_supports_color(Stdout, |t| t.cyan()),
                member.if_supports_color(Stdout, |t| t.green()),
            );
        }
    }

    crate::log_blank();
    log::info!(
        "  Readme:   {}",
        result.readme.as_deref().unwrap_or("(none)")
    );
    if !no_launcher {
        log::info!(
            "  Launcher: {}",
            result.launcher.as_deref().unwrap_or("(none)")
        );
    }
    Ok(())
}

/// Extract a single member next to the caller.
pub(crate) fn run_extract(
    archive: &Path,
    member: &str,
    dest: Option<PathBuf>,
    name: Option<String>,
) -> Result<(), CliError> {
    let filename = declared_name(archive, name);
    let dest = dest.unwrap_or_else(|| PathBuf::from("."));
    let written = ZipArchiver
        .extract(archive, &filename, member, &dest)
        .map_err(|e| CliError::archive(format!("{}: {}", archive.display(), e)))?;
    log::info!(
        "{} {}",
        "Extracted".if_supports_color(Stdout, |t| t.green()),
        written.display()
    );
    Ok(())
}
