use super::*;

const PRODUCTION_JSON: &str = r#"{
    "id": 1234,
    "title": "Second Reality",
    "release_date": "1993-10-07",
    "author_nicks": [
        {"name": "Future Crew", "abbreviation": "FC", "releaser": {"id": 52, "name": "Future Crew", "is_group": true}}
    ],
    "platforms": [{"id": 4, "name": "MS-Dos"}],
    "types": [{"id": 1, "name": "Demo"}],
    "credits": [
        {"nick": {"name": "Psi", "releaser": {"id": 1, "name": "Psi", "is_group": false}}, "category": "Code", "role": ""},
        {"nick": {"name": "Trug", "releaser": {"id": 2, "name": "Trug", "is_group": false}}, "category": "Code", "role": "3D"},
        {"nick": {"name": "Psi", "releaser": {"id": 1, "name": "Psi", "is_group": false}}, "category": "Code", "role": "Vector"},
        {"nick": {"name": "Marvel", "releaser": {"id": 3, "name": "Marvel", "is_group": false}}, "category": "Graphics", "role": ""},
        {"nick": {"name": "Purple Motion", "releaser": {"id": 4, "name": "Purple Motion", "is_group": false}}, "category": "Music", "role": ""},
        {"nick": {"name": "Skaven", "releaser": {"id": 5, "name": "Skaven", "is_group": false}}, "category": "Music", "role": ""},
        {"nick": {"name": "Future Crew", "releaser": {"id": 52, "name": "Future Crew", "is_group": true}}, "category": "Text", "role": ""},
        {"nick": {"name": "Abyss", "releaser": {"id": 6, "name": "Abyss", "is_group": false}}, "category": "Other", "role": "Organiser"}
    ],
    "download_links": [
        {"link_class": "SceneOrgFile", "url": "https://files.scene.org/view/demos/groups/future_crew/demos/scrsrc.zip"}
    ],
    "external_links": [
        {"link_class": "YoutubeVideo", "url": "https://www.youtube.com/watch?v=abc"},
        {"link_class": "PouetProduction", "url": "https://www.pouet.net/prod.php?which=63"}
    ]
}"#;

fn production() -> RemoteProduction {
    serde_json::from_str(PRODUCTION_JSON).unwrap()
}

#[test]
fn parses_production_payload() {
    let prod = production();
    assert_eq!(prod.id, 1234);
    assert_eq!(prod.title, "Second Reality");
    assert_eq!(prod.credits.len(), 8);
    assert_eq!(prod.download_links[0].link_class, "SceneOrgFile");
}

#[test]
fn missing_optional_arrays_default_to_empty() {
    let prod: RemoteProduction = serde_json::from_str(r#"{"id": 7, "title": "x"}"#).unwrap();
    assert!(prod.credits.is_empty());
    assert!(prod.download_links.is_empty());
    assert_eq!(prod.cross_ref_id(), None);
    assert_eq!(prod.platform_tag(), None);
}

#[test]
fn authors_skip_groups_and_deduplicate() {
    let a = production().authors();
    assert_eq!(a.code, vec!["Psi", "Trug"]);
    assert_eq!(a.art, vec!["Marvel"]);
    assert_eq!(a.audio, vec!["Purple Motion", "Skaven"]);
    assert!(a.text.is_empty());
}

#[test]
fn cross_ref_from_first_matching_external_link() {
    assert_eq!(production().cross_ref_id(), Some(63));
}

#[test]
fn cross_ref_rejects_zero_and_garbage() {
    let mut prod = production();
    prod.external_links = vec![
        Link {
            link_class: "PouetProduction".to_string(),
            url: "https://www.pouet.net/prod.php?which=0".to_string(),
        },
        Link {
            link_class: "PouetProduction".to_string(),
            url: "https://www.pouet.net/prod.php?which=abc".to_string(),
        },
        Link {
            link_class: "PouetProduction".to_string(),
            url: "https://www.pouet.net/prod.php?which=99".to_string(),
        },
    ];
    assert_eq!(prod.cross_ref_id(), Some(99));
}

#[test]
fn group_names_come_from_author_nicks() {
    assert_eq!(production().group_names(), vec!["Future Crew"]);
}

#[test]
fn platform_and_section_tags() {
    let prod = production();
    assert_eq!(prod.platform_tag(), Some("dos"));
    assert_eq!(prod.section_tag(), Some("demo"));
    assert_eq!(platform_tag("Amiga AGA"), Some("amiga"));
    assert_eq!(platform_tag("Commodore 64"), None);
    assert_eq!(section_tag("Diskmag"), Some("magazine"));
    assert_eq!(section_tag("Cracktro"), Some("releaseadvert"));
    assert_eq!(section_tag("Graphics"), None);
}

#[test]
fn parses_releaser_productions() {
    let json = r#"[
        {"id": 1, "title": "Unreal", "platforms": [{"id": 4, "name": "MS-Dos"}], "types": []},
        {"id": 2, "title": "Panic"}
    ]"#;
    let list: Vec<ProductionSummary> = serde_json::from_str(json).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].title, "Panic");
    assert!(list[1].release_date.is_none());
}
