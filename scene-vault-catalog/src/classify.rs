//! Archive content classification.
//!
//! Picks the best human-readable description file and the best launch
//! executable out of an archive's flat member listing. Both searches rank
//! every eligible member with an ordered rule list (lower rank wins) and keep
//! the first member seen at the best rank, so the result is deterministic for
//! a given listing order.

/// Result of classifying one archive listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub readme: Option<String>,
    pub launcher: Option<String>,
}

/// A member filename with the attributes the ranking rules look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    /// Lowercase extension without the dot; empty when there is none.
    pub extension: String,
}

impl<'a> Candidate<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            extension: extension_of(name),
        }
    }

    pub fn looks_like_readme(&self) -> bool {
        matches!(self.extension.as_str(), "nfo" | "txt" | "diz")
    }

    pub fn looks_like_executable(&self) -> bool {
        matches!(self.extension.as_str(), "bat" | "exe" | "com")
    }
}

/// Lowercase extension of the file part of `name`. A dotfile such as `.txt`
/// has the extension `txt`.
fn extension_of(name: &str) -> String {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file.rfind('.') {
        Some(dot) => file[dot + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Classify an archive listing.
///
/// The launcher search only runs when `dos` is set, since only DOS-like
/// platforms record a launch program.
pub fn classify<M, V>(base_name: &str, members: &[M], variants: &[V], dos: bool) -> Classification
where
    M: AsRef<str>,
    V: AsRef<str>,
{
    Classification {
        readme: find_readme(base_name, members, variants).map(str::to_string),
        launcher: if dos {
            find_launcher(base_name, members, variants).map(str::to_string)
        } else {
            None
        },
    }
}

/// Find the best description file in `members`.
pub fn find_readme<'m, M, V>(base_name: &str, members: &'m [M], variants: &[V]) -> Option<&'m str>
where
    M: AsRef<str>,
    V: AsRef<str>,
{
    let names = Names::new(base_name, variants);
    best(members, |c| {
        if !c.looks_like_readme() {
            return None;
        }
        let lower = c.name.to_lowercase();
        let ext = c.extension.as_str();
        if lower == names.with("nfo") {
            Some(1)
        } else if names.variant_is(&lower, "nfo") {
            Some(2)
        } else if lower == names.with("txt") {
            Some(3)
        } else if names.variant_is(&lower, "txt") {
            Some(4)
        } else if ext == "nfo" {
            Some(5)
        } else if lower == "file_id.diz" {
            Some(6)
        } else if lower == names.with("diz") {
            Some(7)
        } else if ext == "txt" {
            Some(8)
        } else {
            // only .diz remains
            Some(9)
        }
    })
}

/// Find the best launch program in `members`.
pub fn find_launcher<'m, M, V>(
    base_name: &str,
    members: &'m [M],
    variants: &[V],
) -> Option<&'m str>
where
    M: AsRef<str>,
    V: AsRef<str>,
{
    let names = Names::new(base_name, variants);
    best(members, |c| {
        if !c.looks_like_executable() {
            return None;
        }
        let lower = c.name.to_lowercase();
        let ext = c.extension.as_str();
        if ext == "bat" {
            Some(1)
        } else if lower == names.with("exe") {
            Some(2)
        } else if lower == names.with("com") {
            Some(3)
        } else if names.variant_is(&lower, "exe") {
            Some(4)
        } else if names.variant_is(&lower, "com") {
            Some(5)
        } else if ext == "exe" {
            Some(6)
        } else {
            Some(7)
        }
    })
}

/// Single pass keeping the current best; only a strictly lower rank replaces
/// it, so the first member seen wins ties.
fn best<'m, M, F>(members: &'m [M], rank: F) -> Option<&'m str>
where
    M: AsRef<str>,
    F: Fn(&Candidate<'_>) -> Option<u8>,
{
    let mut top: Option<(u8, &'m str)> = None;
    for member in members {
        let name = member.as_ref();
        let Some(r) = rank(&Candidate::new(name)) else {
            continue;
        };
        if top.is_none_or(|(current, _)| r < current) {
            top = Some((r, name));
        }
    }
    top.map(|(_, name)| name)
}

/// Lowercased base name and variants for case-insensitive comparisons.
struct Names {
    base: String,
    variants: Vec<String>,
}

impl Names {
    fn new<V: AsRef<str>>(base_name: &str, variants: &[V]) -> Self {
        Self {
            base: base_name.to_lowercase(),
            variants: variants
                .iter()
                .map(|v| v.as_ref().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }

    fn with(&self, ext: &str) -> String {
        format!("{}.{ext}", self.base)
    }

    fn variant_is(&self, lower: &str, ext: &str) -> bool {
        self.variants
            .iter()
            .any(|v| lower == format!("{v}.{ext}"))
    }
}
