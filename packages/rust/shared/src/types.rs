//! Core domain types shared by the classifier, extractor, graph, and consensus crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CitelensError;

// ---------------------------------------------------------------------------
// SourceType
// ---------------------------------------------------------------------------

/// Trust-relevant category of a cited source.
///
/// Variants are declared in priority order, which is also the order the
/// classifier evaluates its rules in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    LicensedPublisher,
    Reddit,
    Directory,
    Curated,
    UserGenerated,
}

impl SourceType {
    /// Every source type, highest priority first.
    pub const ALL: [SourceType; 5] = [
        Self::LicensedPublisher,
        Self::Reddit,
        Self::Directory,
        Self::Curated,
        Self::UserGenerated,
    ];

    /// Stable snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LicensedPublisher => "licensed_publisher",
            Self::Reddit => "reddit",
            Self::Directory => "directory",
            Self::Curated => "curated",
            Self::UserGenerated => "user_generated",
        }
    }

    /// Whether facts from this source type count toward validation.
    pub fn is_trusted(&self) -> bool {
        matches!(
            self,
            Self::LicensedPublisher | Self::Curated | Self::Directory
        )
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = CitelensError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| CitelensError::validation(format!("unknown source type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// A web citation observed for an entity, supplied by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Full cited URL. May be malformed.
    pub url: String,
    /// Domain as reported by the collaborator.
    pub domain: String,
    /// Position of the citation in the answer (1 = top).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Externally supplied confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Page title, if fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page excerpt, if fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// When the citation was observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl CitationRecord {
    /// Minimal citation with only a URL and domain.
    pub fn new(url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
            rank: None,
            confidence: None,
            title: None,
            snippet: None,
            observed_at: None,
        }
    }
}

/// A mention of the entity inside an AI-generated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Answer engine that produced the mention (e.g. `chatgpt`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// All raw evidence rows for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInput {
    pub id: String,
    /// Free-form entity category (`business`, `brand`, ...).
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub citations: Vec<CitationRecord>,
    #[serde(default)]
    pub mentions: Vec<MentionRecord>,
}

fn default_entity_type() -> String {
    "business".into()
}

// ---------------------------------------------------------------------------
// ClassificationResult
// ---------------------------------------------------------------------------

/// Outcome of classifying one citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_licensed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,
    /// Directory kind (`yelp`, `gbp`, ...), set only for directory hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_type: Option<String>,
    /// Canonical directory display name, set only for directory hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_name: Option<String>,
}

impl ClassificationResult {
    /// A bare result carrying only the source type.
    pub fn of(source_type: SourceType) -> Self {
        Self {
            source_type,
            is_licensed: None,
            publisher_name: None,
            directory_type: None,
            directory_name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Facts
// ---------------------------------------------------------------------------

/// Kind of structured fact pulled out of evidence text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactType {
    Address,
    Hours,
    Phone,
    Services,
    Pricing,
    Features,
}

impl FactType {
    pub const ALL: [FactType; 6] = [
        Self::Address,
        Self::Hours,
        Self::Phone,
        Self::Services,
        Self::Pricing,
        Self::Features,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Hours => "hours",
            Self::Phone => "phone",
            Self::Services => "services",
            Self::Pricing => "pricing",
            Self::Features => "features",
        }
    }
}

impl std::fmt::Display for FactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FactType {
    type Err = CitelensError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| CitelensError::validation(format!("unknown fact type '{s}'")))
    }
}

/// A typed fact extracted from one evidence node's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFact {
    pub fact_type: FactType,
    /// Raw matched text.
    pub value: String,
    /// Extraction confidence in `[0, 1]`.
    pub confidence: f64,
    pub source_node_id: String,
    pub source_type: SourceType,
    /// Comparison key; see `citelens_extractor::normalize`.
    pub normalized_value: String,
}

impl ExtractedFact {
    /// Grouping key: the normalized value, or the trimmed lowercase raw value
    /// when normalization produced nothing.
    pub fn consensus_key(&self) -> String {
        if self.normalized_value.is_empty() {
            self.value.trim().to_lowercase()
        } else {
            self.normalized_value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_type_priority_order() {
        let mut sorted = SourceType::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, SourceType::ALL.to_vec());
        assert_eq!(SourceType::ALL[0], SourceType::LicensedPublisher);
        assert_eq!(SourceType::ALL[4], SourceType::UserGenerated);
    }

    #[test]
    fn source_type_serializes_snake_case() {
        let json = serde_json::to_string(&SourceType::LicensedPublisher).expect("serialize");
        assert_eq!(json, "\"licensed_publisher\"");
        let parsed: SourceType = "user_generated".parse().expect("parse");
        assert_eq!(parsed, SourceType::UserGenerated);
    }

    #[test]
    fn trusted_source_types() {
        let trusted: Vec<_> = SourceType::ALL.into_iter().filter(|t| t.is_trusted()).collect();
        assert_eq!(
            trusted,
            vec![
                SourceType::LicensedPublisher,
                SourceType::Directory,
                SourceType::Curated
            ]
        );
    }

    #[test]
    fn fact_type_from_str() {
        assert_eq!("Phone".parse::<FactType>().unwrap(), FactType::Phone);
        assert!("email".parse::<FactType>().is_err());
    }

    #[test]
    fn consensus_key_falls_back_to_raw_value() {
        let fact = ExtractedFact {
            fact_type: FactType::Services,
            value: "  Teeth Whitening ".into(),
            confidence: 0.8,
            source_node_id: "ev_1".into(),
            source_type: SourceType::Directory,
            normalized_value: String::new(),
        };
        assert_eq!(fact.consensus_key(), "teeth whitening");
    }

    #[test]
    fn entity_input_defaults() {
        let json = r#"{
            "id": "acme",
            "citations": [{"url": "https://yelp.com/biz/acme", "domain": "yelp.com", "rank": 2}]
        }"#;
        let entity: EntityInput = serde_json::from_str(json).expect("parse entity");
        assert_eq!(entity.entity_type, "business");
        assert_eq!(entity.citations.len(), 1);
        assert_eq!(entity.citations[0].rank, Some(2));
        assert!(entity.mentions.is_empty());
    }
}
