//! Data model types for the file catalog.
//!
//! A [`CatalogRecord`] is one managed file entry. Reconciliation never edits a
//! record in place; it stages a sparse [`RecordPatch`] holding only the fields
//! that changed, which the persistence layer turns into a single update.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Section tags that mark a record as a periodical (diskmag, newsletter).
/// Periodical titles are issue names and never follow the remote title.
const PERIODICAL_SECTIONS: &[&str] = &["magazine", "periodical"];

/// Platform tag for records launched inside a DOS emulator.
pub const DOS_PLATFORM: &str = "dos";

// ── Credits ─────────────────────────────────────────────────────────────────

/// The four credit rolls kept for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditRoll {
    Text,
    Code,
    Art,
    Audio,
}

impl CreditRoll {
    pub const ALL: [CreditRoll; 4] = [Self::Text, Self::Code, Self::Art, Self::Audio];

    /// Human label used in progress and log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "writer",
            Self::Code => "programmer",
            Self::Art => "artist",
            Self::Audio => "musician",
        }
    }
}

impl fmt::Display for CreditRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered person names for each credit roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    pub text: Vec<String>,
    pub code: Vec<String>,
    pub art: Vec<String>,
    pub audio: Vec<String>,
}

impl Credits {
    pub fn roll(&self, roll: CreditRoll) -> &[String] {
        match roll {
            CreditRoll::Text => &self.text,
            CreditRoll::Code => &self.code,
            CreditRoll::Art => &self.art,
            CreditRoll::Audio => &self.audio,
        }
    }

    pub fn roll_mut(&mut self, roll: CreditRoll) -> &mut Vec<String> {
        match roll {
            CreditRoll::Text => &mut self.text,
            CreditRoll::Code => &mut self.code,
            CreditRoll::Art => &mut self.art,
            CreditRoll::Audio => &mut self.audio,
        }
    }

    pub fn is_empty(&self) -> bool {
        CreditRoll::ALL.iter().all(|r| self.roll(*r).is_empty())
    }
}

/// Join a credit roll into its stored column form.
pub fn join_names(names: &[String]) -> String {
    names.join(",")
}

/// Split a stored credit column into names, dropping blanks.
pub fn split_names(column: &str) -> Vec<String> {
    column
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Record ──────────────────────────────────────────────────────────────────

/// One entry in the persistent catalog.
///
/// Empty strings and zero ids read from storage are normalised to `None`, so
/// `None` always means "unset".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRecord {
    pub id: i64,
    pub uuid: String,
    /// Foreign key into the remote production metadata service.
    pub production_id: Option<u64>,
    /// Foreign key into the secondary service, found via external links.
    pub cross_ref_id: Option<u64>,
    pub filename: Option<String>,
    pub file_size: Option<u64>,
    /// Newline-joined archive member names.
    pub member_listing: Option<String>,
    pub weak_hash: Option<String>,
    pub strong_hash: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub platform: Option<String>,
    pub section: Option<String>,
    pub launch_binary: Option<String>,
    pub readme_file: Option<String>,
    pub title: Option<String>,
    pub group_for: Option<String>,
    pub group_by: Option<String>,
    pub credits: Credits,
}

impl CatalogRecord {
    pub fn new(id: i64, uuid: impl Into<String>) -> Self {
        Self {
            id,
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self.production_id, Some(id) if id > 0)
    }

    /// Whether the record's platform runs under DOS emulation.
    pub fn is_dos(&self) -> bool {
        self.platform
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case(DOS_PLATFORM))
    }

    pub fn is_periodical(&self) -> bool {
        self.section.as_deref().is_some_and(|s| {
            PERIODICAL_SECTIONS
                .iter()
                .any(|p| s.eq_ignore_ascii_case(p))
        })
    }

    /// Names of the artifact-derived fields that are still unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.filename.is_none() {
            missing.push("filename");
        }
        if self.file_size.is_none() {
            missing.push("file_size");
        }
        if self.weak_hash.is_none() {
            missing.push("weak_hash");
        }
        if self.strong_hash.is_none() {
            missing.push("strong_hash");
        }
        if self.member_listing.is_none() {
            missing.push("member_listing");
        }
        missing
    }

    pub fn is_incomplete(&self) -> bool {
        !self.missing_fields().is_empty()
    }

    /// The declared filename with its final extension removed.
    pub fn base_name(&self) -> Option<&str> {
        self.filename.as_deref().map(strip_extension)
    }

    /// Archive member names from the cached listing.
    pub fn members(&self) -> Vec<&str> {
        self.member_listing
            .as_deref()
            .map(|l| l.lines().filter(|m| !m.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Apply a patch so the record reflects what was persisted.
    pub fn apply(&mut self, patch: &RecordPatch) {
        match patch.production {
            LinkChange::Unchanged => {}
            LinkChange::Set(id) => self.production_id = Some(id),
            LinkChange::Cleared => self.production_id = None,
        }
        if let Some(id) = patch.cross_ref_id {
            self.cross_ref_id = Some(id);
        }
        if patch.reset_artifact {
            self.filename = None;
            self.file_size = None;
            self.member_listing = None;
            self.weak_hash = None;
            self.strong_hash = None;
            self.launch_binary = None;
            self.readme_file = None;
        }
        set_if(&mut self.filename, &patch.filename);
        if let Some(size) = patch.file_size {
            self.file_size = Some(size);
        }
        set_if(&mut self.member_listing, &patch.member_listing);
        set_if(&mut self.weak_hash, &patch.weak_hash);
        set_if(&mut self.strong_hash, &patch.strong_hash);
        if let Some(ts) = patch.last_modified {
            self.last_modified = Some(ts);
        }
        set_if(&mut self.platform, &patch.platform);
        set_if(&mut self.section, &patch.section);
        set_if(&mut self.launch_binary, &patch.launch_binary);
        set_if(&mut self.readme_file, &patch.readme_file);
        set_if(&mut self.title, &patch.title);
        set_if(&mut self.group_for, &patch.group_for);
        set_if(&mut self.group_by, &patch.group_by);
        for roll in CreditRoll::ALL {
            if let Some(names) = patch.credits(roll) {
                *self.credits.roll_mut(roll) = names.to_vec();
            }
        }
    }
}

fn set_if(field: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *field = Some(v.clone());
    }
}

/// Remove the final `.ext` from a filename, keeping any directory part.
pub fn strip_extension(name: &str) -> &str {
    let file_start = name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match name[file_start..].rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..file_start + dot],
    }
}

/// Turn an empty or whitespace-only string into `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ── Patch ───────────────────────────────────────────────────────────────────

/// What to do with the production link column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkChange {
    /// Leave the stored link alone.
    #[default]
    Unchanged,
    Set(u64),
    /// Deliberately unlink: the remote production no longer exists.
    Cleared,
}

/// The sparse set of fields changed during reconciliation of one record.
///
/// `None` means "not touched". Only populated fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub production: LinkChange,
    pub cross_ref_id: Option<u64>,
    pub filename: Option<String>,
    pub file_size: Option<u64>,
    pub member_listing: Option<String>,
    pub weak_hash: Option<String>,
    pub strong_hash: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub platform: Option<String>,
    pub section: Option<String>,
    pub launch_binary: Option<String>,
    pub readme_file: Option<String>,
    pub title: Option<String>,
    pub group_for: Option<String>,
    pub group_by: Option<String>,
    pub text_credits: Option<Vec<String>>,
    pub code_credits: Option<Vec<String>>,
    pub art_credits: Option<Vec<String>>,
    pub audio_credits: Option<Vec<String>>,
    /// A fresh download replaced the artifact, so every column derived from
    /// the old one is stale. Artifact columns the patch does not restage are
    /// written as NULL.
    pub reset_artifact: bool,
}

impl RecordPatch {
    pub fn credits(&self, roll: CreditRoll) -> Option<&[String]> {
        match roll {
            CreditRoll::Text => self.text_credits.as_deref(),
            CreditRoll::Code => self.code_credits.as_deref(),
            CreditRoll::Art => self.art_credits.as_deref(),
            CreditRoll::Audio => self.audio_credits.as_deref(),
        }
    }

    pub fn set_credits(&mut self, roll: CreditRoll, names: Vec<String>) {
        let slot = match roll {
            CreditRoll::Text => &mut self.text_credits,
            CreditRoll::Code => &mut self.code_credits,
            CreditRoll::Art => &mut self.art_credits,
            CreditRoll::Audio => &mut self.audio_credits,
        };
        *slot = Some(names);
    }

    /// True when no persisted field has been staged.
    pub fn is_empty(&self) -> bool {
        !self.reset_artifact
            && self.production == LinkChange::Unchanged
            && self.cross_ref_id.is_none()
            && self.filename.is_none()
            && self.file_size.is_none()
            && self.member_listing.is_none()
            && self.weak_hash.is_none()
            && self.strong_hash.is_none()
            && self.last_modified.is_none()
            && self.platform.is_none()
            && self.section.is_none()
            && self.launch_binary.is_none()
            && self.readme_file.is_none()
            && self.title.is_none()
            && self.group_for.is_none()
            && self.group_by.is_none()
            && CreditRoll::ALL.iter().all(|r| self.credits(*r).is_none())
    }
}

// ── Record keys ─────────────────────────────────────────────────────────────

/// How a caller names a single record: local id or stable uuid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Id(i64),
    Uuid(Uuid),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("empty record key")]
    Empty,
    #[error("record id must be positive, got {0}")]
    NotPositive(i64),
    #[error("'{0}' is neither a numeric id nor a uuid")]
    Malformed(String),
}

impl FromStr for RecordKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseKeyError::Empty);
        }
        if let Ok(id) = s.parse::<i64>() {
            if id <= 0 {
                return Err(ParseKeyError::NotPositive(id));
            }
            return Ok(Self::Id(id));
        }
        Uuid::parse_str(s)
            .map(Self::Uuid)
            .map_err(|_| ParseKeyError::Malformed(s.to_string()))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}
