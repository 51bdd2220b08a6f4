//! Evidence graph data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use citelens_shared::SourceType;

/// What produced an evidence node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// A crawled web citation.
    Citation,
    /// A mention inside an AI-generated answer.
    CuratedContent,
}

/// Relationship inferred between two evidence nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Confirms,
    Supports,
    /// Never inferred structurally; fact-level disagreement is scored by the
    /// consensus engine instead.
    Contradicts,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirms => "confirms",
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aggregated piece of proof about an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceNode {
    /// Deterministic id (`ev_` + 16 hex chars).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    /// Display label (publisher, directory name, `Reddit`, or the domain).
    pub source: String,
    pub source_domain: String,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_url: Option<String>,
    /// Newline-joined text of every citation merged into this node.
    pub evidence_text: String,
    /// Trust score in `[0, 1]`, rounded to 3 decimals.
    pub authority: f64,
    /// Most recent observation time.
    pub freshness: DateTime<Utc>,
    pub verified: bool,
    pub entity_id: String,
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEdge {
    pub from: String,
    pub to: String,
    pub relationship: Relationship,
    /// In `[0, 1]`.
    pub credibility: f64,
    pub evidence_count: u32,
}

/// Aggregates over the final node set of one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub total_evidence: usize,
    pub licensed_publisher_count: usize,
    pub reddit_count: usize,
    pub directory_count: usize,
    pub curated_count: usize,
    /// Includes mention nodes, which are user-generated by source type.
    pub user_generated_count: usize,
    /// Nodes built from AI-answer mentions.
    pub ai_mention_count: usize,
    pub average_authority: f64,
    pub average_freshness: f64,
    pub verified_count: usize,
}

/// The entity a graph was built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEntity {
    pub id: String,
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvidenceGraph {
    pub entity: GraphEntity,
    pub evidence_nodes: Vec<EvidenceNode>,
    pub edges: Vec<EvidenceEdge>,
    /// Graph-level source diversity score in `[0, 100]`.
    pub consensus_score: u32,
    pub metadata: GraphMetadata,
}
