//! Graph-level aggregates computed from the final node set.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use citelens_shared::SourceType;
use citelens_shared::score::{clamp_unit, round3};

use crate::types::{EvidenceKind, EvidenceNode, GraphMetadata};

const DECAY_DAYS: f64 = 365.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Linear decay: 1 when observed now, 0 once a year old. Future timestamps
/// count as fresh.
pub fn freshness_score(observed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - observed).num_seconds() as f64 / SECONDS_PER_DAY;
    clamp_unit(1.0 - age_days / DECAY_DAYS)
}

pub fn compute_metadata(nodes: &[EvidenceNode], now: DateTime<Utc>) -> GraphMetadata {
    let count = |source_type: SourceType| {
        nodes
            .iter()
            .filter(|n| n.source_type == source_type)
            .count()
    };

    let (average_authority, average_freshness) = if nodes.is_empty() {
        (0.0, 0.0)
    } else {
        let len = nodes.len() as f64;
        let authority: f64 = nodes.iter().map(|n| n.authority).sum();
        let freshness: f64 = nodes.iter().map(|n| freshness_score(n.freshness, now)).sum();
        (round3(authority / len), round3(freshness / len))
    };

    GraphMetadata {
        total_evidence: nodes.len(),
        licensed_publisher_count: count(SourceType::LicensedPublisher),
        reddit_count: count(SourceType::Reddit),
        directory_count: count(SourceType::Directory),
        curated_count: count(SourceType::Curated),
        user_generated_count: count(SourceType::UserGenerated),
        ai_mention_count: nodes
            .iter()
            .filter(|n| n.kind == EvidenceKind::CuratedContent)
            .count(),
        average_authority,
        average_freshness,
        verified_count: nodes.iter().filter(|n| n.verified).count(),
    }
}

/// `min(100, distinct_source_types / 5 * 100 + licensed_nodes * 10)`.
pub fn graph_consensus_score(nodes: &[EvidenceNode]) -> u32 {
    let distinct: BTreeSet<SourceType> = nodes.iter().map(|n| n.source_type).collect();
    let licensed = nodes
        .iter()
        .filter(|n| n.source_type == SourceType::LicensedPublisher)
        .count();

    let per_type = 100 / SourceType::ALL.len();
    let score = distinct.len() * per_type + licensed * 10;
    score.min(100) as u32
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
    }

    fn node(source_type: SourceType, authority: f64, age_days: i64) -> EvidenceNode {
        EvidenceNode {
            id: format!("ev_{source_type}_{age_days}"),
            kind: EvidenceKind::Citation,
            source: "x".into(),
            source_domain: "x.com".into(),
            source_type,
            citation_url: None,
            evidence_text: String::new(),
            authority,
            freshness: now() - Duration::days(age_days),
            verified: source_type == SourceType::LicensedPublisher,
            entity_id: "acme".into(),
            entity_type: "business".into(),
        }
    }

    #[test]
    fn freshness_decays_linearly_over_a_year() {
        assert_eq!(freshness_score(now(), now()), 1.0);
        assert_eq!(round3(freshness_score(now() - Duration::days(73), now())), 0.8);
        assert_eq!(freshness_score(now() - Duration::days(400), now()), 0.0);
        assert_eq!(freshness_score(now() + Duration::days(3), now()), 1.0);
    }

    #[test]
    fn metadata_counts_and_averages() {
        let nodes = vec![
            node(SourceType::LicensedPublisher, 0.9, 0),
            node(SourceType::Reddit, 0.6, 73),
            node(SourceType::Directory, 0.7, 365),
        ];
        let meta = compute_metadata(&nodes, now());
        assert_eq!(meta.total_evidence, 3);
        assert_eq!(meta.licensed_publisher_count, 1);
        assert_eq!(meta.reddit_count, 1);
        assert_eq!(meta.directory_count, 1);
        assert_eq!(meta.curated_count, 0);
        assert_eq!(meta.user_generated_count, 0);
        assert_eq!(meta.ai_mention_count, 0);
        assert_eq!(meta.verified_count, 1);
        assert_eq!(meta.average_authority, 0.733);
        assert_eq!(meta.average_freshness, 0.6);
    }

    #[test]
    fn empty_graph_metadata_is_zeroed() {
        assert_eq!(compute_metadata(&[], now()), GraphMetadata::default());
        assert_eq!(graph_consensus_score(&[]), 0);
    }

    #[test]
    fn consensus_score_rewards_diversity_and_licensing() {
        let nodes = vec![
            node(SourceType::LicensedPublisher, 0.9, 0),
            node(SourceType::Reddit, 0.6, 0),
            node(SourceType::Directory, 0.7, 0),
        ];
        assert_eq!(graph_consensus_score(&nodes), 70);

        let mut many = nodes.clone();
        many.push(node(SourceType::Curated, 0.8, 0));
        many.push(node(SourceType::LicensedPublisher, 0.9, 1));
        assert_eq!(graph_consensus_score(&many), 100);
    }
}
