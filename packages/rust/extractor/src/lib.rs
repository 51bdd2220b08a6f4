//! Regex-driven fact extraction from evidence text.
//!
//! [`extract`] runs independent, non-exclusive passes over one text blob
//! (address, hours, phone, services, pricing, features) and returns every
//! candidate as an [`ExtractedFact`] tagged with the evidence node it came
//! from. Passes never fail; a pass with no matches contributes nothing.

mod address;
mod hours;
mod normalize;
mod offerings;
mod phone;
mod pricing;

use std::ops::Range;

use citelens_shared::{ExtractedFact, FactType, SourceType};
use tracing::{debug, instrument};

pub use normalize::normalize;

// ---------------------------------------------------------------------------
// Pass plumbing
// ---------------------------------------------------------------------------

/// A raw match produced by one pass, before node attribution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub fact_type: FactType,
    pub value: String,
    pub confidence: f64,
}

impl Candidate {
    pub(crate) fn new(fact_type: FactType, value: &str, confidence: f64) -> Self {
        Self {
            fact_type,
            value: value.trim().to_string(),
            confidence,
        }
    }
}

/// Half-open byte ranges share at least one byte.
pub(crate) fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract every fact candidate from `text`.
///
/// Multiple facts of the same type are expected (two phone numbers, a street
/// address and a bare city line). Order is pass order, then match order.
#[instrument(skip_all, fields(node = source_node_id, source_type = %source_type))]
pub fn extract(text: &str, source_node_id: &str, source_type: SourceType) -> Vec<ExtractedFact> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let candidates = address::extract(text)
        .into_iter()
        .chain(hours::extract(text))
        .chain(phone::extract(text))
        .chain(offerings::extract_services(text))
        .chain(pricing::extract(text))
        .chain(offerings::extract_features(text));

    let facts: Vec<ExtractedFact> = candidates
        .filter(|c| !c.value.is_empty())
        .map(|c| ExtractedFact {
            normalized_value: normalize(c.fact_type, &c.value),
            fact_type: c.fact_type,
            value: c.value,
            confidence: c.confidence,
            source_node_id: source_node_id.to_string(),
            source_type,
        })
        .collect();

    debug!(count = facts.len(), "facts extracted");
    facts
}
