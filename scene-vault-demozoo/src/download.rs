//! Download link selection and artifact transfer.
//!
//! Candidate links are rewritten, filtered, and probed in payload order; the
//! first one that answers a `HEAD` successfully is downloaded. Transfers go
//! to a `.part` sibling first and are renamed into place only once complete,
//! so an interrupted run never leaves a truncated artifact behind.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_DISPOSITION, LAST_MODIFIED};

use crate::error::DemozooError;
use crate::types::Link;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

const SCENE_ORG_HOST: &str = "files.scene.org";
const SCENE_ORG_VIEW: &str = "/view/";
const SCENE_ORG_GET: &str = "/get:nl-http/";

/// A completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub path: PathBuf,
    /// Remote filename, from `Content-Disposition` or the final URL segment.
    pub filename: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Transport used for link probing and artifact downloads.
pub trait ArtifactFetcher {
    /// Lightweight existence check. `Ok(false)` means the link answered with
    /// a non-success status.
    fn probe(&self, url: &str) -> Result<bool, DemozooError>;

    /// Fetch `url` into `dest`, calling `progress(bytes_so_far, total)` as
    /// data arrives.
    fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: &dyn Fn(u64, Option<u64>),
    ) -> Result<Downloaded, DemozooError>;
}

/// Correct links to known hosts whose landing pages are not the file itself.
pub fn rewrite_link(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed)
            if parsed.host_str() == Some(SCENE_ORG_HOST)
                && parsed.path().starts_with(SCENE_ORG_VIEW) =>
        {
            url.replacen(SCENE_ORG_VIEW, SCENE_ORG_GET, 1)
        }
        _ => url.to_string(),
    }
}

/// Whether `url` points back at this catalog (the host or any sub-domain).
pub fn is_self_link(url: &str, catalog_host: &str) -> bool {
    let catalog_host = catalog_host.trim().to_ascii_lowercase();
    if catalog_host.is_empty() {
        return false;
    }
    let Some(host) = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };
    host == catalog_host || host.ends_with(&format!(".{catalog_host}"))
}

/// Pick the first usable download link, already rewritten.
pub fn select_link(
    links: &[Link],
    catalog_host: &str,
    fetcher: &dyn ArtifactFetcher,
) -> Option<String> {
    for link in links {
        let url = rewrite_link(&link.url);
        if is_self_link(&url, catalog_host) {
            log::debug!("skipping self link {url}");
            continue;
        }
        match fetcher.probe(&url) {
            Ok(true) => return Some(url),
            Ok(false) => log::debug!("probe rejected {url}"),
            Err(e) => log::debug!("probe failed for {url}: {e}"),
        }
    }
    None
}

/// Select a link and download it to `dest`.
pub fn fetch_artifact(
    links: &[Link],
    catalog_host: &str,
    fetcher: &dyn ArtifactFetcher,
    dest: &Path,
    progress: &dyn Fn(u64, Option<u64>),
) -> Result<Downloaded, DemozooError> {
    let url = select_link(links, catalog_host, fetcher).ok_or(DemozooError::NoUsableLink)?;
    log::info!("downloading {url}");
    fetcher.download(&url, dest, progress)
}

/// [`ArtifactFetcher`] over blocking HTTP.
pub struct HttpFetcher {
    http: Client,
    probe_timeout: Duration,
    download_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(
        user_agent: &str,
        probe_timeout: Duration,
        download_timeout: Duration,
    ) -> Result<Self, DemozooError> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            probe_timeout,
            download_timeout,
        })
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn probe(&self, url: &str) -> Result<bool, DemozooError> {
        let resp = self.http.head(url).timeout(self.probe_timeout).send()?;
        Ok(resp.status().is_success())
    }

    fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: &dyn Fn(u64, Option<u64>),
    ) -> Result<Downloaded, DemozooError> {
        let mut resp = self.http.get(url).timeout(self.download_timeout).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DemozooError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let filename = response_filename(&resp)
            .ok_or_else(|| DemozooError::download(format!("no filename for {url}")))?;
        let last_modified = resp
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date);
        let total = resp.content_length();

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let part = part_path(dest);
        let size = match stream_to(&mut resp, &part, total, progress) {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&part);
                return Err(e);
            }
        };
        if let Some(expected) = total
            && expected != size
        {
            let _ = fs::remove_file(&part);
            return Err(DemozooError::download(format!(
                "{url}: received {size} of {expected} bytes"
            )));
        }
        fs::rename(&part, dest)?;

        Ok(Downloaded {
            path: dest.to_path_buf(),
            filename,
            size,
            last_modified,
        })
    }
}

fn stream_to(
    reader: &mut impl Read,
    path: &Path,
    total: Option<u64>,
    progress: &dyn Fn(u64, Option<u64>),
) -> Result<u64, DemozooError> {
    let mut out = File::create(path)?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written: u64 = 0;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])?;
        written += n as u64;
        progress(written, total);
    }
    out.flush()?;
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn response_filename(resp: &Response) -> Option<String> {
    resp.headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(disposition_filename)
        .or_else(|| url_filename(resp.url()))
}

/// Extract `filename=` from a `Content-Disposition` value.
pub(crate) fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, val) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| val.trim().trim_matches('"').to_string())
        })
        .filter(|name| !name.is_empty())
        .map(|name| {
            // Final path component only.
            name.rsplit(['/', '\\']).next().unwrap_or(&name).to_string()
        })
}

/// The final non-empty path segment of `url`.
pub(crate) fn url_filename(url: &Url) -> Option<String> {
    url.path_segments()?
        .rev()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an HTTP date header (RFC 2822 form) into UTC.
pub(crate) fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "tests/download_tests.rs"]
mod tests;
