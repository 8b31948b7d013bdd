use scene_vault_catalog::*;

const NONE: &[&str] = &[];

#[test]
fn base_name_nfo_dominates_everything() {
    let members = [
        "file_id.diz",
        "razor.nfo",
        "game.txt",
        "other.nfo",
        "GAME.NFO",
        ".txt",
    ];
    let readme = find_readme("game", &members, &["razor"]);
    assert_eq!(readme, Some("GAME.NFO"));
}

#[test]
fn no_readme_without_description_extensions() {
    let members = ["game.exe", "data.dat", "readme", "manual.doc"];
    assert_eq!(find_readme("game", &members, NONE), None);
}

#[test]
fn empty_listing_yields_nothing() {
    let members: [&str; 0] = [];
    let result = classify("game", &members, NONE, true);
    assert_eq!(result, Classification::default());
}

#[test]
fn variant_nfo_beats_base_txt() {
    let members = ["game.txt", "fairlight.nfo"];
    assert_eq!(
        find_readme("game", &members, &["fairlight"]),
        Some("fairlight.nfo")
    );
}

#[test]
fn any_nfo_beats_file_id_diz() {
    let members = ["file_id.diz", "crew.nfo"];
    assert_eq!(find_readme("game", &members, NONE), Some("crew.nfo"));
}

#[test]
fn file_id_diz_beats_base_diz_and_loose_text() {
    let members = ["notes.txt", "game.diz", "FILE_ID.DIZ"];
    assert_eq!(find_readme("game", &members, NONE), Some("FILE_ID.DIZ"));
}

#[test]
fn loose_text_beats_loose_diz() {
    let members = ["other.diz", "notes.txt"];
    assert_eq!(find_readme("game", &members, NONE), Some("notes.txt"));
}

#[test]
fn same_rank_keeps_first_seen() {
    let members = ["b.nfo", "a.nfo"];
    assert_eq!(find_readme("game", &members, NONE), Some("b.nfo"));

    let members = ["one.exe", "two.exe"];
    assert_eq!(find_launcher("game", &members, NONE), Some("one.exe"));
}

#[test]
fn scenario_game_exe_and_readme() {
    let members = ["game.exe", "readme.txt"];
    let result = classify("game", &members, NONE, true);
    assert_eq!(result.readme.as_deref(), Some("readme.txt"));
    assert_eq!(result.launcher.as_deref(), Some("game.exe"));
}

#[test]
fn scenario_batch_file_dominates() {
    let members = ["file_id.diz", "pkg.exe", "install.bat", "pkg.com"];
    let result = classify("pkg", &members, NONE, true);
    assert_eq!(result.readme.as_deref(), Some("file_id.diz"));
    assert_eq!(result.launcher.as_deref(), Some("install.bat"));
}

#[test]
fn launcher_rank_order() {
    assert_eq!(
        find_launcher("demo", &["x.com", "x.exe", "demo.com"], NONE),
        Some("demo.com")
    );
    assert_eq!(
        find_launcher("demo", &["demo.com", "DEMO.EXE"], NONE),
        Some("DEMO.EXE")
    );
    assert_eq!(
        find_launcher("demo", &["x.exe", "crew.com"], &["crew"]),
        Some("crew.com")
    );
    assert_eq!(
        find_launcher("demo", &["crew.com", "crew.exe"], &["crew"]),
        Some("crew.exe")
    );
    assert_eq!(find_launcher("demo", &["x.com", "y.exe"], NONE), Some("y.exe"));
}

#[test]
fn launcher_skipped_for_non_dos_platforms() {
    let members = ["game.exe", "game.nfo"];
    let result = classify("game", &members, NONE, false);
    assert_eq!(result.readme.as_deref(), Some("game.nfo"));
    assert_eq!(result.launcher, None);
}

#[test]
fn classifier_is_repeatable() {
    let members = ["a.txt", "b.nfo", "c.exe", "d.bat"];
    let first = classify("z", &members, NONE, true);
    let second = classify("z", &members, NONE, true);
    assert_eq!(first, second);
}

#[test]
fn group_variants_cover_common_spellings() {
    let v = group_variants("The Silents");
    assert_eq!(
        v,
        vec![
            "the silents",
            "thesilents",
            "the_silents",
            "the-silents",
            "silents"
        ]
    );
    assert_eq!(group_variants("Fairlight"), vec!["fairlight"]);
    assert!(group_variants("  ").is_empty());
}

#[test]
fn record_variants_merge_both_group_columns() {
    let mut record = CatalogRecord::new(1, "u");
    record.group_for = Some("Razor 1911".to_string());
    record.group_by = Some("Razor 1911, Fairlight".to_string());
    let v = record_variants(&record);
    assert_eq!(
        v,
        vec!["razor 1911", "razor1911", "razor_1911", "razor-1911", "fairlight"]
    );
}
