use std::cell::RefCell;
use std::collections::HashSet;

use super::*;

/// Answers probes from a fixed set of live URLs and records every probe.
struct FakeFetcher {
    live: HashSet<String>,
    probed: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn new(live: &[&str]) -> Self {
        Self {
            live: live.iter().map(|s| s.to_string()).collect(),
            probed: RefCell::new(Vec::new()),
        }
    }
}

impl ArtifactFetcher for FakeFetcher {
    fn probe(&self, url: &str) -> Result<bool, DemozooError> {
        self.probed.borrow_mut().push(url.to_string());
        if url.contains("broken") {
            return Err(DemozooError::download("connection reset"));
        }
        Ok(self.live.contains(url))
    }

    fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: &dyn Fn(u64, Option<u64>),
    ) -> Result<Downloaded, DemozooError> {
        fs::write(dest, b"PK\x05\x06")?;
        progress(4, Some(4));
        Ok(Downloaded {
            path: dest.to_path_buf(),
            filename: url.rsplit('/').next().unwrap_or_default().to_string(),
            size: 4,
            last_modified: None,
        })
    }
}

fn link(url: &str) -> Link {
    Link {
        link_class: "BaseUrl".to_string(),
        url: url.to_string(),
    }
}

#[test]
fn rewrites_scene_org_view_links() {
    assert_eq!(
        rewrite_link("https://files.scene.org/view/parties/1993/demo.zip"),
        "https://files.scene.org/get:nl-http/parties/1993/demo.zip"
    );
    assert_eq!(
        rewrite_link("https://example.com/view/demo.zip"),
        "https://example.com/view/demo.zip"
    );
    assert_eq!(rewrite_link("not a url"), "not a url");
}

#[test]
fn self_links_match_host_and_subdomains() {
    assert!(is_self_link("https://defacto2.net/d/abc", "defacto2.net"));
    assert!(is_self_link("https://www.Defacto2.net/f/abc", "defacto2.net"));
    assert!(!is_self_link("https://notdefacto2.net/f/abc", "defacto2.net"));
    assert!(!is_self_link("https://example.com/", ""));
}

#[test]
fn select_skips_self_links_without_probing() {
    let fetcher = FakeFetcher::new(&["https://defacto2.net/d/1", "https://example.com/a.zip"]);
    let links = [link("https://defacto2.net/d/1"), link("https://example.com/a.zip")];
    let chosen = select_link(&links, "defacto2.net", &fetcher);
    assert_eq!(chosen.as_deref(), Some("https://example.com/a.zip"));
    assert_eq!(*fetcher.probed.borrow(), vec!["https://example.com/a.zip"]);
}

#[test]
fn select_probes_rewritten_link_and_passes_over_failures() {
    let fetcher = FakeFetcher::new(&["https://files.scene.org/get:nl-http/x.zip"]);
    let links = [
        link("https://broken.example/x.zip"),
        link("https://dead.example/x.zip"),
        link("https://files.scene.org/view/x.zip"),
    ];
    let chosen = select_link(&links, "defacto2.net", &fetcher);
    assert_eq!(
        chosen.as_deref(),
        Some("https://files.scene.org/get:nl-http/x.zip")
    );
    assert_eq!(fetcher.probed.borrow().len(), 3);
}

#[test]
fn fetch_without_usable_link_fails() {
    let fetcher = FakeFetcher::new(&[]);
    let dir = tempfile::tempdir().unwrap();
    let err = fetch_artifact(
        &[link("https://dead.example/x.zip")],
        "defacto2.net",
        &fetcher,
        &dir.path().join("uuid"),
        &|_, _| {},
    )
    .unwrap_err();
    assert!(matches!(err, DemozooError::NoUsableLink));
}

#[test]
fn fetch_downloads_first_live_link() {
    let fetcher = FakeFetcher::new(&["https://example.com/demo.zip"]);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("uuid");
    let seen = RefCell::new(Vec::new());
    let got = fetch_artifact(
        &[link("https://example.com/demo.zip")],
        "defacto2.net",
        &fetcher,
        &dest,
        &|n, total| seen.borrow_mut().push((n, total)),
    )
    .unwrap();
    assert_eq!(got.filename, "demo.zip");
    assert_eq!(got.size, 4);
    assert!(dest.exists());
    assert_eq!(*seen.borrow(), vec![(4, Some(4))]);
}

#[test]
fn disposition_filename_variants() {
    assert_eq!(
        disposition_filename(r#"attachment; filename="demo.zip""#).as_deref(),
        Some("demo.zip")
    );
    assert_eq!(
        disposition_filename("attachment; FILENAME=demo.zip").as_deref(),
        Some("demo.zip")
    );
    assert_eq!(
        disposition_filename(r#"attachment; filename="../../etc/demo.zip""#).as_deref(),
        Some("demo.zip")
    );
    assert_eq!(disposition_filename("inline"), None);
    assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
}

#[test]
fn url_filename_uses_last_segment() {
    let url = Url::parse("https://example.com/pub/demo.zip").unwrap();
    assert_eq!(url_filename(&url).as_deref(), Some("demo.zip"));
    let url = Url::parse("https://example.com/pub/dir/").unwrap();
    assert_eq!(url_filename(&url).as_deref(), Some("dir"));
    let url = Url::parse("https://example.com/").unwrap();
    assert_eq!(url_filename(&url), None);
}

#[test]
fn http_dates_parse_as_utc() {
    let ts = parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
    assert_eq!(ts.to_rfc3339(), "2015-10-21T07:28:00+00:00");
    assert!(parse_http_date("yesterday").is_none());
}

#[test]
fn part_path_appends_suffix() {
    assert_eq!(
        part_path(Path::new("/tmp/abc")),
        PathBuf::from("/tmp/abc.part")
    );
}
