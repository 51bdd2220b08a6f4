//! Fact-level consensus and validation scoring.
//!
//! [`calculate_fact_level_consensus`] groups extracted facts by type and
//! normalized value, measures how strongly independent source types agree on
//! the most common value, and counts disagreements between values backed by
//! disjoint sets of source types. Scoring is pure: facts are only read, and
//! the same input in the same order always yields the same scores.

mod groups;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use citelens_shared::score::percent;
use citelens_shared::{ExtractedFact, FactType, SourceType};

use crate::groups::{contradiction_count, group_by_value, most_common};

/// Minimum trusted-agreement percentage for a validated fact.
pub const VALIDATION_THRESHOLD: u32 = 70;

/// Minimum consensus percentage for a validated fact.
pub const CONSENSUS_THRESHOLD: u32 = 60;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactValidation {
    pub validated: bool,
    /// Share of trusted-source facts agreeing with the most common value,
    /// or the consensus when no trusted facts exist.
    pub validation_score: u32,
    /// Share of distinct source types backing the most common value.
    pub cross_engine_consensus: u32,
    /// Facts from licensed publishers, curated sources, and directories.
    pub trusted_source_count: usize,
    /// Distinct source types with at least one fact disagreeing with the
    /// most common value.
    pub conflicting_source_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactConsensusScore {
    pub fact_type: FactType,
    /// Agreement in `[0, 100]`.
    pub consensus: u32,
    pub agreement_count: usize,
    pub contradiction_count: usize,
    pub independent_sources: usize,
    pub facts: Vec<ExtractedFact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_value: Option<String>,
    pub validation: FactValidation,
}

impl FactConsensusScore {
    /// The zero score reported for a fact type with no facts.
    pub fn neutral(fact_type: FactType) -> Self {
        Self {
            fact_type,
            consensus: 0,
            agreement_count: 0,
            contradiction_count: 0,
            independent_sources: 0,
            facts: Vec::new(),
            most_common_value: None,
            validation: FactValidation::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score every fact type present in `facts`, in [`FactType`] order.
///
/// With a filter, only that type is scored and exactly one entry is
/// returned, neutral if no facts of that type exist.
#[instrument(skip_all, fields(facts = facts.len(), filter = ?fact_type_filter))]
pub fn calculate_fact_level_consensus(
    facts: &[ExtractedFact],
    fact_type_filter: Option<FactType>,
) -> Vec<FactConsensusScore> {
    let mut by_type: BTreeMap<FactType, Vec<&ExtractedFact>> = BTreeMap::new();
    for fact in facts {
        if fact_type_filter.is_none_or(|t| t == fact.fact_type) {
            by_type.entry(fact.fact_type).or_default().push(fact);
        }
    }

    if let Some(fact_type) = fact_type_filter {
        let typed = by_type.remove(&fact_type).unwrap_or_default();
        return vec![score_fact_type(fact_type, &typed)];
    }

    by_type
        .into_iter()
        .map(|(fact_type, typed)| score_fact_type(fact_type, &typed))
        .collect()
}

/// Score one fact type. `facts` must all be of `fact_type`.
pub fn score_fact_type(fact_type: FactType, facts: &[&ExtractedFact]) -> FactConsensusScore {
    let groups = group_by_value(facts);
    let Some(top) = most_common(&groups) else {
        return FactConsensusScore::neutral(fact_type);
    };
    let top_group = &groups[top];

    let total = facts.len();
    let agreement_count = top_group.facts.len();
    let contradiction_count = contradiction_count(&groups);
    let neutral_count = total.saturating_sub(agreement_count + contradiction_count);
    let consensus = percent(
        agreement_count,
        agreement_count + contradiction_count + neutral_count,
    );

    let source_types: BTreeSet<SourceType> = facts.iter().map(|f| f.source_type).collect();

    let trusted: Vec<&&ExtractedFact> = facts
        .iter()
        .filter(|f| f.source_type.is_trusted())
        .collect();
    let trusted_agreements = trusted
        .iter()
        .filter(|f| f.consensus_key() == top_group.key)
        .count();
    let validation_score = if trusted.is_empty() {
        consensus
    } else {
        percent(trusted_agreements, trusted.len())
    };

    let conflicting: BTreeSet<SourceType> = facts
        .iter()
        .filter(|f| f.consensus_key() != top_group.key)
        .map(|f| f.source_type)
        .collect();

    let validated = validation_score >= VALIDATION_THRESHOLD
        && consensus >= CONSENSUS_THRESHOLD
        && contradiction_count == 0;

    debug!(
        %fact_type,
        values = groups.len(),
        agreement_count,
        contradiction_count,
        consensus,
        validated,
        "fact type scored"
    );

    FactConsensusScore {
        fact_type,
        consensus,
        agreement_count,
        contradiction_count,
        independent_sources: source_types.len(),
        facts: facts.iter().map(|f| (*f).clone()).collect(),
        most_common_value: Some(top_group.key.clone()),
        validation: FactValidation {
            validated,
            validation_score,
            cross_engine_consensus: percent(top_group.source_types.len(), source_types.len()),
            trusted_source_count: trusted.len(),
            conflicting_source_count: conflicting.len(),
        },
    }
}
