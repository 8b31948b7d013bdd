use reqwest::Url;
use serde::Deserialize;

/// Link class of external links pointing at the secondary service.
const CROSS_REF_CLASS: &str = "PouetProduction";

/// Query parameter holding the secondary service's production id.
const CROSS_REF_PARAM: &str = "which";

/// A production as returned by `productions/{id}/`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemoteProduction {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub author_nicks: Vec<Nick>,
    #[serde(default)]
    pub platforms: Vec<Named>,
    #[serde(default)]
    pub types: Vec<Named>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default)]
    pub download_links: Vec<Link>,
    #[serde(default)]
    pub external_links: Vec<Link>,
}

/// A production entry from `releasers/{id}/productions/`.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductionSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Named>,
    #[serde(default)]
    pub types: Vec<Named>,
}

/// A scener's or group's handle.
#[derive(Debug, Deserialize, Clone)]
pub struct Nick {
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    pub releaser: Releaser,
}

/// The authoring entity behind a nick.
#[derive(Debug, Deserialize, Clone)]
pub struct Releaser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_group: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Credit {
    pub nick: Nick,
    pub category: String,
    #[serde(default)]
    pub role: String,
}

/// A classified URL (download or external link).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Link {
    pub link_class: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Named {
    pub id: u64,
    pub name: String,
}

/// Per-person credits split into the catalog's four rolls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authors {
    pub text: Vec<String>,
    pub code: Vec<String>,
    pub art: Vec<String>,
    pub audio: Vec<String>,
}

fn push_unique(roll: &mut Vec<String>, name: &str) {
    if !roll.iter().any(|n| n == name) {
        roll.push(name.to_string());
    }
}

impl RemoteProduction {
    /// Credits of individual people, grouped by roll. Group-owned credits
    /// are left out.
    pub fn authors(&self) -> Authors {
        let mut a = Authors::default();
        for credit in &self.credits {
            if credit.nick.releaser.is_group {
                continue;
            }
            let roll = match credit.category.as_str() {
                "Text" => &mut a.text,
                "Code" => &mut a.code,
                "Graphics" => &mut a.art,
                "Music" => &mut a.audio,
                _ => continue,
            };
            push_unique(roll, &credit.nick.name);
        }
        a
    }

    /// Id in the secondary service, read from the first matching external
    /// link.
    pub fn cross_ref_id(&self) -> Option<u64> {
        self.external_links
            .iter()
            .filter(|l| l.link_class == CROSS_REF_CLASS)
            .find_map(|l| cross_ref_from_url(&l.url))
    }

    /// Names of the groups credited as authors.
    pub fn group_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for nick in self.author_nicks.iter().filter(|n| n.releaser.is_group) {
            push_unique(&mut names, &nick.name);
        }
        names
    }

    /// Catalog platform tag for the first remote platform.
    pub fn platform_tag(&self) -> Option<&'static str> {
        self.platforms.first().and_then(|p| platform_tag(&p.name))
    }

    /// Catalog section tag for the first production type.
    pub fn section_tag(&self) -> Option<&'static str> {
        self.types.first().and_then(|t| section_tag(&t.name))
    }
}

fn cross_ref_from_url(raw: &str) -> Option<u64> {
    let url = Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == CROSS_REF_PARAM)
        .and_then(|(_, v)| v.trim().parse::<u64>().ok())
        .filter(|id| *id > 0)
}

/// Map a remote platform name to the catalog's platform tag.
pub fn platform_tag(name: &str) -> Option<&'static str> {
    match name {
        "MS-Dos" => Some("dos"),
        "Windows" => Some("windows"),
        "Linux" => Some("linux"),
        "Amiga OCS/ECS" | "Amiga AGA" | "Amiga PPC/RTG" => Some("amiga"),
        "Java" => Some("java"),
        _ => None,
    }
}

/// Map a remote production type to the catalog's section tag.
pub fn section_tag(name: &str) -> Option<&'static str> {
    match name {
        "Diskmag" | "Textmag" => Some("magazine"),
        "Intro" | "4K Intro" | "64K Intro" | "40k Intro" => Some("intro"),
        "Demo" => Some("demo"),
        "Cracktro" => Some("releaseadvert"),
        "Tool" => Some("tool"),
        "Music" => Some("music"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
