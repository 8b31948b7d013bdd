//! Partial-update statement builder.
//!
//! Maps a [`RecordPatch`] to the smallest `UPDATE` that persists it: one
//! column per populated field, in a fixed order, followed by the
//! `updated_at`/`updated_by` bookkeeping columns. An empty patch maps to an
//! empty statement, which callers must not execute.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use scene_vault_catalog::{CreditRoll, LinkChange, RecordPatch, join_names};

/// A parameterised update of one `files` row.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub id: i64,
    pub columns: Vec<&'static str>,
    /// One argument per entry in `columns`, in the same order.
    pub args: Vec<Value>,
}

impl UpdateStatement {
    pub fn empty(id: i64) -> Self {
        Self {
            id,
            columns: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Render the statement template. The row id binds to the last
    /// placeholder.
    pub fn sql(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let set: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c} = ?{}", i + 1))
            .collect();
        format!(
            "UPDATE files SET {} WHERE id = ?{}",
            set.join(", "),
            self.columns.len() + 1
        )
    }

    /// Positional arguments including the trailing row id.
    pub fn params(&self) -> Vec<Value> {
        let mut params = self.args.clone();
        params.push(Value::Integer(self.id));
        params
    }

    fn push(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.args.push(value);
    }
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn integer(n: u64) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Build the minimal update for `patch` against row `id`.
pub fn build_update(
    id: i64,
    patch: &RecordPatch,
    now: DateTime<Utc>,
    actor: &str,
) -> UpdateStatement {
    let mut stmt = UpdateStatement::empty(id);

    if let Some(ref v) = patch.title {
        stmt.push("title", text(v));
    }
    if let Some(ref v) = patch.group_for {
        stmt.push("group_for", text(v));
    }
    if let Some(ref v) = patch.group_by {
        stmt.push("group_by", text(v));
    }
    for roll in CreditRoll::ALL {
        if let Some(names) = patch.credits(roll) {
            stmt.push(credit_column(roll), Value::Text(join_names(names)));
        }
    }
    if let Some(ref v) = patch.platform {
        stmt.push("platform", text(v));
    }
    if let Some(ref v) = patch.section {
        stmt.push("section", text(v));
    }
    // After a fresh download, artifact columns not restaged are cleared.
    let reset = patch.reset_artifact;
    artifact_text(&mut stmt, "filename", &patch.filename, reset);
    match patch.file_size {
        Some(v) => stmt.push("file_size", integer(v)),
        None if reset => stmt.push("file_size", Value::Null),
        None => {}
    }
    artifact_text(&mut stmt, "member_listing", &patch.member_listing, reset);
    artifact_text(&mut stmt, "weak_hash", &patch.weak_hash, reset);
    artifact_text(&mut stmt, "strong_hash", &patch.strong_hash, reset);
    if let Some(v) = patch.last_modified {
        stmt.push("last_modified", Value::Text(timestamp(v)));
    }
    artifact_text(&mut stmt, "launch_binary", &patch.launch_binary, reset);
    artifact_text(&mut stmt, "readme_file", &patch.readme_file, reset);
    if let Some(v) = patch.cross_ref_id {
        stmt.push("cross_ref_id", integer(v));
    }
    match patch.production {
        LinkChange::Unchanged => {}
        LinkChange::Set(v) => stmt.push("production_id", integer(v)),
        LinkChange::Cleared => stmt.push("production_id", Value::Null),
    }

    if stmt.is_empty() {
        return stmt;
    }
    stmt.push("updated_at", Value::Text(timestamp(now)));
    stmt.push("updated_by", text(actor));
    stmt
}

fn artifact_text(
    stmt: &mut UpdateStatement,
    column: &'static str,
    value: &Option<String>,
    reset: bool,
) {
    match value {
        Some(v) => stmt.push(column, text(v)),
        None if reset => stmt.push(column, Value::Null),
        None => {}
    }
}

pub(crate) fn credit_column(roll: CreditRoll) -> &'static str {
    match roll {
        CreditRoll::Text => "text_credits",
        CreditRoll::Code => "code_credits",
        CreditRoll::Art => "art_credits",
        CreditRoll::Audio => "audio_credits",
    }
}

pub(crate) fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
