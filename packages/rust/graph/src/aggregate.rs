//! Citation and mention rows -> evidence nodes.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use citelens_classifier::{SourceClassifier, Subject};
use citelens_shared::{CitationRecord, ClassificationResult, MentionRecord, SourceType};

use crate::authority::calculate_authority_score;
use crate::types::{EvidenceKind, EvidenceNode};

/// Authority of every mention node.
pub const MENTION_AUTHORITY: f64 = 0.5;

/// `source_domain` for mentions that do not name their engine.
pub const DEFAULT_MENTION_DOMAIN: &str = "ai_answer";

const EVIDENCE_SEPARATOR: &str = " - ";

/// Build one node per distinct (domain, source type) from `citations`, then
/// one node per mention. Citations come first, each group in input order.
pub fn aggregate_evidence(
    classifier: &SourceClassifier,
    citations: &[CitationRecord],
    mentions: &[MentionRecord],
    entity_id: &str,
    entity_type: &str,
    now: DateTime<Utc>,
) -> Vec<EvidenceNode> {
    let mut nodes: Vec<EvidenceNode> = Vec::with_capacity(citations.len() + mentions.len());
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for citation in citations {
        let classification = classifier.classify(citation);
        let domain = Subject::new(citation).domain;
        let key = format!("{domain}_{}", classification.source_type);

        let authority = calculate_authority_score(
            classification.source_type,
            citation.rank,
            citation.confidence,
        );
        let text = citation_text(citation);
        let observed = citation.observed_at.unwrap_or(now);

        if let Some(&idx) = by_key.get(&key) {
            let node = &mut nodes[idx];
            node.evidence_text.push('\n');
            node.evidence_text.push_str(&text);
            node.authority = node.authority.max(authority);
            node.freshness = node.freshness.max(observed);
            debug!(%key, node = %node.id, "merged citation into existing node");
            continue;
        }

        let node = EvidenceNode {
            id: node_id(entity_id, &key),
            kind: EvidenceKind::Citation,
            source: source_label(&domain, &classification),
            source_domain: domain,
            source_type: classification.source_type,
            citation_url: Some(citation.url.clone()),
            evidence_text: text,
            authority,
            freshness: observed,
            verified: classification.source_type == SourceType::LicensedPublisher,
            entity_id: entity_id.to_string(),
            entity_type: entity_type.to_string(),
        };
        debug!(%key, node = %node.id, authority, "created evidence node");
        by_key.insert(key, nodes.len());
        nodes.push(node);
    }

    let mut seen_mentions = HashSet::new();
    for mention in mentions {
        if !seen_mentions.insert(mention.id.as_str()) {
            debug!(mention = %mention.id, "skipping repeated mention id");
            continue;
        }

        let engine = mention
            .engine
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_MENTION_DOMAIN)
            .to_lowercase();

        nodes.push(EvidenceNode {
            id: node_id(entity_id, &format!("mention_{}", mention.id)),
            kind: EvidenceKind::CuratedContent,
            source: engine.clone(),
            source_domain: engine,
            source_type: SourceType::UserGenerated,
            citation_url: None,
            evidence_text: mention.snippet.clone().unwrap_or_default(),
            authority: MENTION_AUTHORITY,
            freshness: mention.created_at.unwrap_or(now),
            verified: false,
            entity_id: entity_id.to_string(),
            entity_type: entity_type.to_string(),
        });
    }

    nodes
}

/// `ev_` + the first 16 hex chars of SHA-256(entity id + node key).
pub fn node_id(entity_id: &str, key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(entity_id.as_bytes());
    hasher.update(key.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    format!("ev_{}", &hex[..16])
}

/// URL, title and snippet joined by ` - `, skipping blanks.
fn citation_text(citation: &CitationRecord) -> String {
    [
        Some(citation.url.as_str()),
        citation.title.as_deref(),
        citation.snippet.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(EVIDENCE_SEPARATOR)
}

fn source_label(domain: &str, classification: &ClassificationResult) -> String {
    let named = match classification.source_type {
        SourceType::LicensedPublisher => classification.publisher_name.clone(),
        SourceType::Directory => classification.directory_name.clone(),
        SourceType::Reddit => Some("Reddit".to_string()),
        SourceType::Curated if domain.contains("wikipedia") => Some("Wikipedia".to_string()),
        _ => None,
    };
    named.unwrap_or_else(|| domain.to_string())
}
