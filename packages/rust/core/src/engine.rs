//! End-to-end analysis: classify -> graph -> extract -> consensus.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use citelens_consensus::{FactConsensusScore, calculate_fact_level_consensus};
use citelens_graph::{EntityEvidenceGraph, GraphBuilder};
use citelens_shared::{EntityInput, ExtractedFact, FactType, ReferenceData};

/// Everything computed for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnalysis {
    pub graph: EntityEvidenceGraph,
    /// Facts from every node, in node order.
    pub facts: Vec<ExtractedFact>,
    pub fact_consensus: Vec<FactConsensusScore>,
}

/// Stateless analysis engine over shared, read-only reference tables.
///
/// Safe to share across threads; each call works only on its own entity.
pub struct EvidenceEngine {
    graph: GraphBuilder,
}

impl EvidenceEngine {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            graph: GraphBuilder::new(reference),
        }
    }

    pub fn analyze(&self, entity: &EntityInput) -> EntityAnalysis {
        self.run(entity, Utc::now(), None)
    }

    /// Analyze with an explicit clock for freshness.
    pub fn analyze_at(&self, entity: &EntityInput, now: DateTime<Utc>) -> EntityAnalysis {
        self.run(entity, now, None)
    }

    /// Analyze, scoring consensus for a single fact type only.
    pub fn analyze_with_filter(
        &self,
        entity: &EntityInput,
        fact_type: Option<FactType>,
    ) -> EntityAnalysis {
        self.run(entity, Utc::now(), fact_type)
    }

    /// Analyze entities independently against one shared clock.
    pub fn analyze_batch(&self, entities: &[EntityInput]) -> Vec<EntityAnalysis> {
        self.analyze_batch_with_filter(entities, None)
    }

    pub fn analyze_batch_with_filter(
        &self,
        entities: &[EntityInput],
        fact_type: Option<FactType>,
    ) -> Vec<EntityAnalysis> {
        let now = Utc::now();
        entities
            .iter()
            .map(|entity| self.run(entity, now, fact_type))
            .collect()
    }

    #[instrument(skip_all, fields(entity = %entity.id))]
    fn run(
        &self,
        entity: &EntityInput,
        now: DateTime<Utc>,
        fact_type: Option<FactType>,
    ) -> EntityAnalysis {
        let start = Instant::now();

        let graph = self.graph.build_at(entity, now);

        let facts: Vec<ExtractedFact> = graph
            .evidence_nodes
            .iter()
            .flat_map(|node| {
                citelens_extractor::extract(&node.evidence_text, &node.id, node.source_type)
            })
            .collect();

        let fact_consensus = calculate_fact_level_consensus(&facts, fact_type);

        info!(
            nodes = graph.evidence_nodes.len(),
            facts = facts.len(),
            validated = fact_consensus
                .iter()
                .filter(|s| s.validation.validated)
                .count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "entity analyzed"
        );

        EntityAnalysis {
            graph,
            facts,
            fact_consensus,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::TimeZone;
    use citelens_shared::{SourceType, read_reference_file};

    use super::*;
    use crate::input::load_entities;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
    }

    fn fixture_engine() -> EvidenceEngine {
        let data = read_reference_file(Path::new("../../../fixtures/reference/reference-data.toml"))
            .expect("read reference fixture");
        EvidenceEngine::new(Arc::new(data))
    }

    fn entity(name: &str) -> EntityInput {
        let path = format!("../../../fixtures/entities/{name}");
        load_entities(Path::new(&path))
            .expect("load entity fixture")
            .remove(0)
    }

    fn score_for(analysis: &EntityAnalysis, fact_type: FactType) -> &FactConsensusScore {
        analysis
            .fact_consensus
            .iter()
            .find(|s| s.fact_type == fact_type)
            .expect("score for fact type")
    }

    #[test]
    fn scenario_end_to_end() {
        let analysis = fixture_engine().analyze_at(&entity("scenario.json"), now());
        let nodes = &analysis.graph.evidence_nodes;

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].source_type, SourceType::LicensedPublisher);
        assert_eq!(nodes[0].authority, 0.9);
        assert!(nodes[0].verified);
        assert_eq!(nodes[1].source_type, SourceType::Reddit);
        assert_eq!(nodes[2].source_type, SourceType::Directory);
        assert_eq!(analysis.graph.metadata.licensed_publisher_count, 1);

        // URL-only evidence carries no facts.
        assert!(analysis.facts.is_empty());
        assert!(analysis.fact_consensus.is_empty());
    }

    #[test]
    fn empty_reference_data_degrades_to_user_generated() {
        let engine = EvidenceEngine::new(Arc::new(ReferenceData::default()));
        let analysis = engine.analyze_at(&entity("scenario.json"), now());
        assert!(
            analysis
                .graph
                .evidence_nodes
                .iter()
                .all(|n| n.source_type == SourceType::UserGenerated)
        );
        assert_eq!(analysis.graph.metadata.licensed_publisher_count, 0);
        assert_eq!(analysis.graph.metadata.user_generated_count, 3);
    }

    #[test]
    fn dental_listing_phone_consensus() {
        let analysis = fixture_engine().analyze_at(&entity("bright-smile-dental.json"), now());
        let phone = score_for(&analysis, FactType::Phone);

        // Directory x2, curated, and an AI mention agree; reddit disagrees.
        assert_eq!(phone.most_common_value.as_deref(), Some("2175550142"));
        assert_eq!(phone.agreement_count, 4);
        assert_eq!(phone.contradiction_count, 1);
        assert_eq!(phone.consensus, 80);
        assert_eq!(phone.independent_sources, 4);
        assert_eq!(phone.validation.validation_score, 100);
        assert_eq!(phone.validation.conflicting_source_count, 1);
        assert!(!phone.validation.validated);
    }

    #[test]
    fn dental_listing_address_validates() {
        let analysis = fixture_engine().analyze_at(&entity("bright-smile-dental.json"), now());
        let address = score_for(&analysis, FactType::Address);

        assert_eq!(
            address.most_common_value.as_deref(),
            Some("742 evergreen terrace ave springfield il 62704")
        );
        assert_eq!(address.agreement_count, 2);
        assert_eq!(address.consensus, 100);
        assert!(address.validation.validated);
    }

    #[test]
    fn facts_reference_graph_nodes() {
        let analysis = fixture_engine().analyze_at(&entity("bright-smile-dental.json"), now());
        for fact in &analysis.facts {
            let node = analysis
                .graph
                .evidence_nodes
                .iter()
                .find(|n| n.id == fact.source_node_id)
                .expect("fact points at a node");
            assert_eq!(node.source_type, fact.source_type);
        }
        assert!(analysis.facts.iter().any(|f| f.fact_type == FactType::Pricing));
        assert!(analysis.facts.iter().any(|f| f.fact_type == FactType::Services));
    }

    #[test]
    fn filter_limits_consensus_to_one_type() {
        let analysis = fixture_engine()
            .analyze_with_filter(&entity("bright-smile-dental.json"), Some(FactType::Features));
        assert_eq!(
            analysis.fact_consensus,
            vec![FactConsensusScore::neutral(FactType::Features)]
        );
        assert!(!analysis.facts.is_empty());
    }

    #[test]
    fn batch_matches_individual_runs() {
        let engine = fixture_engine();
        let entities = vec![entity("scenario.json"), entity("bright-smile-dental.json")];
        let batch = engine.analyze_batch(&entities);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].graph.entity.id, "entity-scenario");
        assert_eq!(batch[1].graph.entity.id, "bright-smile-dental");
        assert_eq!(batch[1].facts, engine.analyze(&entities[1]).facts);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EvidenceEngine>();

        let engine = fixture_engine();
        let entities = vec![entity("scenario.json"), entity("bright-smile-dental.json")];
        let sequential: Vec<EntityAnalysis> =
            entities.iter().map(|e| engine.analyze_at(e, now())).collect();

        let shared = &engine;
        let parallel: Vec<EntityAnalysis> = std::thread::scope(|scope| {
            let handles: Vec<_> = entities
                .iter()
                .map(|e| scope.spawn(move || shared.analyze_at(e, now())))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("analysis thread"))
                .collect()
        });

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_entity_is_a_neutral_analysis() {
        let entity: EntityInput = serde_json::from_str(r#"{"id": "ghost"}"#).expect("parse");
        let analysis = fixture_engine().analyze_at(&entity, now());
        assert!(analysis.graph.evidence_nodes.is_empty());
        assert!(analysis.facts.is_empty());
        assert!(analysis.fact_consensus.is_empty());
        assert_eq!(analysis.graph.consensus_score, 0);
    }
}
