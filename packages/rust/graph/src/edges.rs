//! Pairwise relationship inference between evidence nodes.

use std::collections::HashMap;

use citelens_shared::score::{clamp_unit, round3};

use crate::types::{EvidenceEdge, EvidenceNode, Relationship};

/// Both endpoints above this authority confirm each other.
const CONFIRM_THRESHOLD: f64 = 0.7;

/// Credibility added each time an existing edge is re-derived.
const STRENGTHEN_STEP: f64 = 0.1;

/// Edges keyed by `(from, to, relationship)`, in first-inference order.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<EvidenceEdge>,
    index: HashMap<(String, String, Relationship), usize>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one inference pass over `nodes`, adding new edges and
    /// strengthening ones already present.
    pub fn infer(&mut self, nodes: &[EvidenceNode]) {
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                if a.source_domain == b.source_domain {
                    continue;
                }
                let credibility = round3((a.authority + b.authority) / 2.0);
                self.record(&a.id, &b.id, infer_relationship(a, b), credibility);
            }
        }
    }

    /// Insert an edge, or strengthen it if the same triple already exists.
    pub fn record(&mut self, from: &str, to: &str, relationship: Relationship, credibility: f64) {
        let key = (from.to_string(), to.to_string(), relationship);
        if let Some(&idx) = self.index.get(&key) {
            let edge = &mut self.edges[idx];
            edge.evidence_count += 1;
            edge.credibility = round3((edge.credibility + STRENGTHEN_STEP).min(1.0));
            return;
        }

        self.index.insert(key, self.edges.len());
        self.edges.push(EvidenceEdge {
            from: from.to_string(),
            to: to.to_string(),
            relationship,
            credibility: clamp_unit(credibility),
            evidence_count: 1,
        });
    }

    pub fn edges(&self) -> &[EvidenceEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_edges(self) -> Vec<EvidenceEdge> {
        self.edges
    }
}

/// Single-pass edge inference.
pub fn build_edges(nodes: &[EvidenceNode]) -> Vec<EvidenceEdge> {
    let mut set = EdgeSet::new();
    set.infer(nodes);
    set.into_edges()
}

/// `confirms` when both authorities exceed 0.7, otherwise `supports`.
/// Structural inference is optimistic and never yields `contradicts`.
pub fn infer_relationship(a: &EvidenceNode, b: &EvidenceNode) -> Relationship {
    if a.authority > CONFIRM_THRESHOLD && b.authority > CONFIRM_THRESHOLD {
        Relationship::Confirms
    } else {
        Relationship::Supports
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use citelens_shared::SourceType;

    use super::*;
    use crate::types::EvidenceKind;

    fn node(id: &str, domain: &str, source_type: SourceType, authority: f64) -> EvidenceNode {
        EvidenceNode {
            id: id.into(),
            kind: EvidenceKind::Citation,
            source: domain.into(),
            source_domain: domain.into(),
            source_type,
            citation_url: None,
            evidence_text: String::new(),
            authority,
            freshness: Utc::now(),
            verified: false,
            entity_id: "acme".into(),
            entity_type: "business".into(),
        }
    }

    #[test]
    fn relationship_thresholds() {
        let strong = node("a", "a.com", SourceType::LicensedPublisher, 0.9);
        let curated = node("b", "b.org", SourceType::Curated, 0.8);
        let directory = node("c", "c.com", SourceType::Directory, 0.7);
        let weak = node("d", "d.com", SourceType::UserGenerated, 0.4);

        assert_eq!(infer_relationship(&strong, &curated), Relationship::Confirms);
        assert_eq!(infer_relationship(&strong, &directory), Relationship::Supports);
        assert_eq!(infer_relationship(&strong, &weak), Relationship::Supports);
        assert_eq!(infer_relationship(&weak, &weak), Relationship::Supports);
    }

    #[test]
    fn same_domain_pairs_are_skipped() {
        let nodes = vec![
            node("a", "yelp.com", SourceType::Directory, 0.7),
            node("b", "yelp.com", SourceType::UserGenerated, 0.4),
            node("c", "bbb.org", SourceType::Directory, 0.7),
        ];
        let edges = build_edges(&nodes);
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "c"), ("b", "c")]);
    }

    #[test]
    fn new_edge_credibility_is_mean_authority() {
        let nodes = vec![
            node("a", "a.com", SourceType::LicensedPublisher, 0.9),
            node("b", "b.com", SourceType::Reddit, 0.6),
        ];
        let edges = build_edges(&nodes);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].credibility, 0.75);
        assert_eq!(edges[0].evidence_count, 1);
        assert!(edges.iter().all(|e| e.relationship != Relationship::Contradicts));
    }

    #[test]
    fn repeated_inference_strengthens_up_to_one() {
        let nodes = vec![
            node("a", "a.com", SourceType::LicensedPublisher, 0.9),
            node("b", "b.org", SourceType::Curated, 0.8),
        ];
        let mut set = EdgeSet::new();
        set.infer(&nodes);
        set.infer(&nodes);
        assert_eq!(set.len(), 1);
        assert_eq!(set.edges()[0].evidence_count, 2);
        assert_eq!(set.edges()[0].credibility, 0.95);

        set.infer(&nodes);
        assert_eq!(set.edges()[0].evidence_count, 3);
        assert_eq!(set.edges()[0].credibility, 1.0);
    }

    #[test]
    fn distinct_relationships_are_distinct_edges() {
        let mut set = EdgeSet::new();
        set.record("a", "b", Relationship::Supports, 0.5);
        set.record("a", "b", Relationship::Confirms, 0.9);
        set.record("a", "b", Relationship::Supports, 0.5);
        assert_eq!(set.len(), 2);
        assert_eq!(set.edges()[0].evidence_count, 2);
        assert_eq!(set.edges()[0].credibility, 0.6);
        assert_eq!(set.edges()[1].evidence_count, 1);
    }

    #[test]
    fn no_nodes_no_edges() {
        assert!(build_edges(&[]).is_empty());
        assert!(EdgeSet::new().is_empty());
    }
}
