use chrono::{TimeZone, Utc};
use rusqlite::types::Value;
use scene_vault_catalog::*;
use scene_vault_db::*;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn empty_patch_builds_empty_statement() {
    let stmt = build_update(7, &RecordPatch::default(), now(), "sync");
    assert!(stmt.is_empty());
    assert!(stmt.args.is_empty());
    assert_eq!(stmt.sql(), "");
}

#[test]
fn single_field_adds_exactly_two_bookkeeping_columns() {
    let cases: Vec<(&str, RecordPatch)> = vec![
        (
            "title",
            RecordPatch {
                title: Some("Second Reality".into()),
                ..Default::default()
            },
        ),
        (
            "file_size",
            RecordPatch {
                file_size: Some(1024),
                ..Default::default()
            },
        ),
        (
            "art_credits",
            RecordPatch {
                art_credits: Some(vec!["Pixel".into(), "Marvel".into()]),
                ..Default::default()
            },
        ),
        (
            "cross_ref_id",
            RecordPatch {
                cross_ref_id: Some(63),
                ..Default::default()
            },
        ),
        (
            "last_modified",
            RecordPatch {
                last_modified: Some(now()),
                ..Default::default()
            },
        ),
        (
            "production_id",
            RecordPatch {
                production: LinkChange::Cleared,
                ..Default::default()
            },
        ),
    ];

    for (column, patch) in cases {
        let stmt = build_update(1, &patch, now(), "sync");
        assert_eq!(stmt.columns.len(), 3, "column count for {column}");
        assert_eq!(stmt.args.len(), 3, "arg count for {column}");
        assert_eq!(stmt.columns, vec![column, "updated_at", "updated_by"]);
    }
}

#[test]
fn columns_follow_fixed_order() {
    let patch = RecordPatch {
        readme_file: Some("game.nfo".into()),
        title: Some("Game".into()),
        file_size: Some(5),
        production: LinkChange::Set(9),
        ..Default::default()
    };
    let stmt = build_update(3, &patch, now(), "sync");
    assert_eq!(
        stmt.columns,
        vec![
            "title",
            "file_size",
            "readme_file",
            "production_id",
            "updated_at",
            "updated_by"
        ]
    );
    assert_eq!(
        stmt.sql(),
        "UPDATE files SET title = ?1, file_size = ?2, readme_file = ?3, production_id = ?4, \
         updated_at = ?5, updated_by = ?6 WHERE id = ?7"
    );
    let params = stmt.params();
    assert_eq!(params.len(), 7);
    assert_eq!(params[6], Value::Integer(3));
}

#[test]
fn credits_are_comma_joined() {
    let patch = RecordPatch {
        code_credits: Some(vec!["Psi".into(), "Wildfire".into()]),
        ..Default::default()
    };
    let stmt = build_update(1, &patch, now(), "sync");
    assert_eq!(stmt.args[0], Value::Text("Psi,Wildfire".into()));
}

#[test]
fn cleared_link_writes_null() {
    let patch = RecordPatch {
        production: LinkChange::Cleared,
        ..Default::default()
    };
    let stmt = build_update(1, &patch, now(), "sync");
    assert_eq!(stmt.args[0], Value::Null);
    assert_eq!(stmt.args[1], Value::Text("2024-03-01T12:00:00Z".into()));
    assert_eq!(stmt.args[2], Value::Text("sync".into()));
}

#[test]
fn building_twice_is_identical() {
    let patch = RecordPatch {
        title: Some("x".into()),
        weak_hash: Some("abc".into()),
        ..Default::default()
    };
    assert_eq!(
        build_update(1, &patch, now(), "sync"),
        build_update(1, &patch, now(), "sync")
    );
}

#[test]
fn reset_clears_artifact_columns_not_restaged() {
    let patch = RecordPatch {
        reset_artifact: true,
        filename: Some("new.zip".into()),
        file_size: Some(10),
        weak_hash: Some("w".into()),
        strong_hash: Some("s".into()),
        ..Default::default()
    };
    let stmt = build_update(1, &patch, now(), "sync");
    assert_eq!(
        stmt.columns,
        vec![
            "filename",
            "file_size",
            "member_listing",
            "weak_hash",
            "strong_hash",
            "launch_binary",
            "readme_file",
            "updated_at",
            "updated_by",
        ]
    );
    assert_eq!(stmt.args[2], Value::Null);
    assert_eq!(stmt.args[5], Value::Null);
    assert_eq!(stmt.args[6], Value::Null);
}
