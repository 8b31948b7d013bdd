//! Alternate spellings of group names as they tend to appear in filenames.
//!
//! Archives are often named after the releasing group rather than the
//! production, so `Razor 1911` may show up as `razor1911.nfo` or
//! `razor_1911.exe`.

use crate::types::{CatalogRecord, split_names};

/// Filename spellings of a single group name, lowercase and de-duplicated.
pub fn group_variants(name: &str) -> Vec<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut push = |v: String| {
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    };

    let bases = match name.strip_prefix("the ") {
        Some(rest) => vec![name.clone(), rest.trim().to_string()],
        None => vec![name.clone()],
    };
    for base in bases {
        push(base.clone());
        if base.contains(' ') {
            push(base.replace(' ', ""));
            push(base.replace(' ', "_"));
            push(base.replace(' ', "-"));
        }
    }
    out
}

/// Variants for every group named in a record's `group_for` and `group_by`.
pub fn record_variants(record: &CatalogRecord) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let groups = [record.group_for.as_deref(), record.group_by.as_deref()];
    for column in groups.into_iter().flatten() {
        for name in split_names(column) {
            for v in group_variants(&name) {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        }
    }
    out
}
