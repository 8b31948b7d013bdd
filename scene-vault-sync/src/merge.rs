//! Staging of remote metadata into a record patch.
//!
//! Each step compares one concern of the remote production against the
//! stored record and stages a change only when they differ. Nothing here
//! touches storage.

use scene_vault_catalog::{CatalogRecord, CreditRoll, RecordPatch, join_names};
use scene_vault_demozoo::{Authors, RemoteProduction};

/// Run every merge step.
pub fn merge_remote(record: &CatalogRecord, remote: &RemoteProduction, patch: &mut RecordPatch) {
    merge_cross_ref(record, remote, patch);
    merge_title(record, remote, patch);
    merge_authors(record, &remote.authors(), patch);
    merge_tags(record, remote, patch);
}

pub fn merge_cross_ref(record: &CatalogRecord, remote: &RemoteProduction, patch: &mut RecordPatch) {
    if let Some(id) = remote.cross_ref_id()
        && record.cross_ref_id != Some(id)
    {
        patch.cross_ref_id = Some(id);
    }
}

/// Periodicals keep their issue titles.
pub fn merge_title(record: &CatalogRecord, remote: &RemoteProduction, patch: &mut RecordPatch) {
    if record.is_periodical() {
        return;
    }
    let title = remote.title.trim();
    if title.is_empty() {
        return;
    }
    let same = record
        .title
        .as_deref()
        .is_some_and(|t| t.trim().to_lowercase() == title.to_lowercase());
    if !same {
        patch.title = Some(title.to_string());
    }
}

/// A roll is only overwritten when the remote lists more than one person
/// for it. A single stored name is usually the group, not a person.
pub fn merge_authors(record: &CatalogRecord, authors: &Authors, patch: &mut RecordPatch) {
    for roll in CreditRoll::ALL {
        let remote = remote_roll(authors, roll);
        if remote.len() > 1 && remote != record.credits.roll(roll) {
            patch.set_credits(roll, remote.to_vec());
        }
    }
}

fn remote_roll(authors: &Authors, roll: CreditRoll) -> &[String] {
    match roll {
        CreditRoll::Text => &authors.text,
        CreditRoll::Code => &authors.code,
        CreditRoll::Art => &authors.art,
        CreditRoll::Audio => &authors.audio,
    }
}

/// Fill empty platform, section and releasing group. Never overwrites.
pub fn merge_tags(record: &CatalogRecord, remote: &RemoteProduction, patch: &mut RecordPatch) {
    if record.platform.is_none()
        && let Some(tag) = remote.platform_tag()
    {
        patch.platform = Some(tag.to_string());
    }
    if record.section.is_none()
        && let Some(tag) = remote.section_tag()
    {
        patch.section = Some(tag.to_string());
    }
    if record.group_by.is_none() {
        let groups = remote.group_names();
        if !groups.is_empty() {
            patch.group_by = Some(join_names(&groups));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_vault_demozoo::{Link, Named, Nick, Releaser};

    fn remote(title: &str) -> RemoteProduction {
        RemoteProduction {
            id: 500,
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn record() -> CatalogRecord {
        let mut r = CatalogRecord::new(1, "9f0c7d3e-0000-4000-8000-000000000001");
        r.production_id = Some(500);
        r
    }

    fn nick(name: &str, is_group: bool) -> Nick {
        Nick {
            name: name.to_string(),
            abbreviation: String::new(),
            releaser: Releaser {
                id: 1,
                name: name.to_string(),
                is_group,
            },
        }
    }

    #[test]
    fn title_compare_ignores_case() {
        let mut rec = record();
        rec.title = Some("Foo".to_string());
        let mut patch = RecordPatch::default();
        merge_title(&rec, &remote("FOO"), &mut patch);
        assert!(patch.title.is_none());

        merge_title(&rec, &remote("Foo II"), &mut patch);
        assert_eq!(patch.title.as_deref(), Some("Foo II"));
    }

    #[test]
    fn periodical_titles_are_kept() {
        let mut rec = record();
        rec.title = Some("Issue 12".to_string());
        rec.section = Some("Magazine".to_string());
        let mut patch = RecordPatch::default();
        merge_title(&rec, &remote("Imphobia"), &mut patch);
        assert!(patch.is_empty());
    }

    #[test]
    fn empty_remote_title_is_ignored() {
        let mut patch = RecordPatch::default();
        merge_title(&record(), &remote("  "), &mut patch);
        assert!(patch.title.is_none());
    }

    #[test]
    fn single_name_rolls_are_never_overwritten() {
        let mut rec = record();
        rec.credits.art = vec!["Razor 1911".to_string()];
        let authors = Authors {
            art: vec!["Lazur".to_string()],
            code: vec!["Psi".to_string(), "Wildfire".to_string()],
            ..Default::default()
        };
        let mut patch = RecordPatch::default();
        merge_authors(&rec, &authors, &mut patch);
        assert!(patch.art_credits.is_none());
        assert_eq!(
            patch.code_credits,
            Some(vec!["Psi".to_string(), "Wildfire".to_string()])
        );
    }

    #[test]
    fn identical_rolls_are_not_staged() {
        let mut rec = record();
        rec.credits.audio = vec!["Purple Motion".to_string(), "Skaven".to_string()];
        let authors = Authors {
            audio: vec!["Purple Motion".to_string(), "Skaven".to_string()],
            ..Default::default()
        };
        let mut patch = RecordPatch::default();
        merge_authors(&rec, &authors, &mut patch);
        assert!(patch.is_empty());
    }

    #[test]
    fn cross_ref_staged_only_when_different() {
        let mut prod = remote("x");
        prod.external_links = vec![Link {
            link_class: "PouetProduction".to_string(),
            url: "https://www.pouet.net/prod.php?which=81".to_string(),
        }];
        let mut rec = record();
        let mut patch = RecordPatch::default();
        merge_cross_ref(&rec, &prod, &mut patch);
        assert_eq!(patch.cross_ref_id, Some(81));

        rec.cross_ref_id = Some(81);
        let mut patch = RecordPatch::default();
        merge_cross_ref(&rec, &prod, &mut patch);
        assert!(patch.is_empty());
    }

    #[test]
    fn tags_fill_empty_fields_only() {
        let mut prod = remote("x");
        prod.platforms = vec![Named {
            id: 4,
            name: "MS-Dos".to_string(),
        }];
        prod.types = vec![Named {
            id: 2,
            name: "Intro".to_string(),
        }];
        prod.author_nicks = vec![nick("Fairlight", true), nick("Someone", false)];

        let mut patch = RecordPatch::default();
        merge_tags(&record(), &prod, &mut patch);
        assert_eq!(patch.platform.as_deref(), Some("dos"));
        assert_eq!(patch.section.as_deref(), Some("intro"));
        assert_eq!(patch.group_by.as_deref(), Some("Fairlight"));

        let mut rec = record();
        rec.platform = Some("windows".to_string());
        rec.section = Some("demo".to_string());
        rec.group_by = Some("Razor 1911".to_string());
        let mut patch = RecordPatch::default();
        merge_tags(&rec, &prod, &mut patch);
        assert!(patch.is_empty());
    }
}
