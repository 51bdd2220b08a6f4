//! Evidence graph construction.
//!
//! [`GraphBuilder`] turns one entity's citation and mention rows into an
//! [`EntityEvidenceGraph`]: classified, merged evidence nodes with authority
//! and freshness, inferred edges between nodes on different domains, and
//! aggregate metadata. Each stage is also exposed on its own:
//! [`aggregate_evidence`], [`build_edges`] / [`EdgeSet`], [`compute_metadata`].
//!
//! Graphs are rebuilt from source rows on every call; nothing is cached
//! between entities.

pub mod aggregate;
pub mod authority;
pub mod edges;
pub mod metadata;
pub mod types;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use citelens_classifier::SourceClassifier;
use citelens_shared::{CitationRecord, EntityInput, MentionRecord, ReferenceData};

pub use aggregate::{aggregate_evidence, node_id};
pub use authority::{base_authority, calculate_authority_score};
pub use edges::{EdgeSet, build_edges, infer_relationship};
pub use metadata::{compute_metadata, freshness_score, graph_consensus_score};
pub use types::{
    EntityEvidenceGraph, EvidenceEdge, EvidenceKind, EvidenceNode, GraphEntity, GraphMetadata,
    Relationship,
};

/// Builds evidence graphs against one set of reference tables.
pub struct GraphBuilder {
    classifier: SourceClassifier,
}

impl GraphBuilder {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self::with_classifier(SourceClassifier::new(reference))
    }

    pub fn with_classifier(classifier: SourceClassifier) -> Self {
        Self { classifier }
    }

    /// Build the graph, measuring freshness against the current time.
    pub fn build(&self, entity: &EntityInput) -> EntityEvidenceGraph {
        self.build_at(entity, Utc::now())
    }

    /// Build the graph with an explicit clock.
    #[instrument(skip_all, fields(entity = %entity.id))]
    pub fn build_at(&self, entity: &EntityInput, now: DateTime<Utc>) -> EntityEvidenceGraph {
        let nodes = self.aggregate_evidence(
            &entity.citations,
            &entity.mentions,
            &entity.id,
            &entity.entity_type,
            now,
        );
        let edges = build_edges(&nodes);
        let metadata = compute_metadata(&nodes, now);
        let consensus_score = graph_consensus_score(&nodes);

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            consensus_score,
            "evidence graph built"
        );

        EntityEvidenceGraph {
            entity: GraphEntity {
                id: entity.id.clone(),
                entity_type: entity.entity_type.clone(),
                name: entity.name.clone(),
            },
            evidence_nodes: nodes,
            edges,
            consensus_score,
            metadata,
        }
    }

    /// Classify and merge rows into nodes using this builder's classifier.
    pub fn aggregate_evidence(
        &self,
        citations: &[CitationRecord],
        mentions: &[MentionRecord],
        entity_id: &str,
        entity_type: &str,
        now: DateTime<Utc>,
    ) -> Vec<EvidenceNode> {
        aggregate_evidence(
            &self.classifier,
            citations,
            mentions,
            entity_id,
            entity_type,
            now,
        )
    }
}
