//! Static reference tables used by the source classifier.
//!
//! Reference data is loaded once at startup from a TOML document and then
//! shared read-only (typically behind an `Arc`) across every classification.
//! Loading never fails: a missing or unparseable file degrades to empty
//! tables and the returned [`ReferenceOrigin::Defaults`] says so.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CitelensError, Result};

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// A directory listing site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Directory kind, e.g. `yelp`, `gbp`, `bbb`.
    #[serde(rename = "type")]
    pub directory_type: String,
    /// Display name as written in the reference file.
    pub name: String,
}

/// `[reddit]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedditTable {
    #[serde(default)]
    pub domains: BTreeSet<String>,
    /// Lowercase URL fragments that identify reddit links (e.g. `/r/`).
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// `[curated]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedTable {
    #[serde(default)]
    pub domains: BTreeSet<String>,
}

/// Lookup tables consulted by the classifier.
///
/// Ordered collections keep substring scans deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Licensed publisher domain -> display name.
    #[serde(default)]
    pub publishers: BTreeMap<String, String>,
    /// Directory domain -> kind and name.
    #[serde(default)]
    pub directories: BTreeMap<String, DirectoryEntry>,
    /// Secondary directory keywords (`google.com` -> `gbp`), matched against
    /// domain or URL when no directory domain hits.
    #[serde(default)]
    pub directory_keywords: BTreeMap<String, String>,
    #[serde(default)]
    pub reddit: RedditTable,
    #[serde(default)]
    pub curated: CuratedTable,
}

impl ReferenceData {
    /// Parse a reference document and normalize every domain key.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: ReferenceData = toml::from_str(content)
            .map_err(|e| CitelensError::reference_data(format!("invalid reference TOML: {e}")))?;
        Ok(raw.normalized())
    }

    /// True when every table is empty.
    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
            && self.directories.is_empty()
            && self.directory_keywords.is_empty()
            && self.reddit.domains.is_empty()
            && self.reddit.patterns.is_empty()
            && self.curated.domains.is_empty()
    }

    /// Lowercase and strip scheme / `www.` from all domain keys; lowercase patterns.
    fn normalized(self) -> Self {
        Self {
            publishers: self
                .publishers
                .into_iter()
                .map(|(domain, name)| (normalize_domain(&domain), name))
                .filter(|(domain, _)| !domain.is_empty())
                .collect(),
            directories: self
                .directories
                .into_iter()
                .map(|(domain, entry)| {
                    let entry = DirectoryEntry {
                        directory_type: entry.directory_type.trim().to_lowercase(),
                        name: entry.name,
                    };
                    (normalize_domain(&domain), entry)
                })
                .filter(|(domain, _)| !domain.is_empty())
                .collect(),
            directory_keywords: self
                .directory_keywords
                .into_iter()
                .map(|(keyword, kind)| (keyword.trim().to_lowercase(), kind.trim().to_lowercase()))
                .filter(|(keyword, _)| !keyword.is_empty())
                .collect(),
            reddit: RedditTable {
                domains: normalize_set(self.reddit.domains),
                patterns: self
                    .reddit
                    .patterns
                    .into_iter()
                    .map(|p| p.trim().to_lowercase())
                    .filter(|p| !p.is_empty())
                    .collect(),
            },
            curated: CuratedTable {
                domains: normalize_set(self.curated.domains),
            },
        }
    }
}

fn normalize_set(domains: BTreeSet<String>) -> BTreeSet<String> {
    domains
        .iter()
        .map(|d| normalize_domain(d))
        .filter(|d| !d.is_empty())
        .collect()
}

/// Lowercase a domain and strip any scheme and a leading `www.`.
///
/// Other subdomains are preserved; root-domain fallbacks rely on them.
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_lowercase();
    let without_scheme = match lower.find("://") {
        Some(idx) => &lower[idx + 3..],
        None => lower.as_str(),
    };
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    without_www.trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Where the active reference data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceOrigin {
    /// Parsed successfully from this file.
    File(PathBuf),
    /// Nothing usable was loaded; every table is empty.
    Defaults { reason: String },
}

/// Reference data plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedReference {
    pub data: ReferenceData,
    pub origin: ReferenceOrigin,
}

impl LoadedReference {
    /// True when the loader fell back to empty tables.
    pub fn using_defaults(&self) -> bool {
        matches!(self.origin, ReferenceOrigin::Defaults { .. })
    }
}

/// Load reference tables from `path`, degrading to empty tables on any failure.
pub fn load_reference_data(path: Option<&Path>) -> LoadedReference {
    let Some(path) = path else {
        return defaults("no reference data path configured".into());
    };

    match read_reference_file(path) {
        Ok(data) => {
            tracing::debug!(
                path = %path.display(),
                publishers = data.publishers.len(),
                directories = data.directories.len(),
                reddit_domains = data.reddit.domains.len(),
                curated_domains = data.curated.domains.len(),
                "reference data loaded"
            );
            LoadedReference {
                data,
                origin: ReferenceOrigin::File(path.to_path_buf()),
            }
        }
        Err(e) => defaults(e.to_string()),
    }
}

/// Strict variant of [`load_reference_data`] for callers that want the error.
pub fn read_reference_file(path: &Path) -> Result<ReferenceData> {
    let content = std::fs::read_to_string(path).map_err(|e| CitelensError::io(path, e))?;
    ReferenceData::from_toml_str(&content)
}

fn defaults(reason: String) -> LoadedReference {
    tracing::warn!(
        %reason,
        "reference data unavailable, using defaults; table-driven rules will not match"
    );
    LoadedReference {
        data: ReferenceData::default(),
        origin: ReferenceOrigin::Defaults { reason },
    }
}
