//! Analysis orchestration for citelens.
//!
//! [`EvidenceEngine`] runs the full chain for one entity (source
//! classification, evidence graph, fact extraction over every node, fact-level
//! consensus) and [`input`] reads entity rows from JSON files.

pub mod engine;
pub mod input;

pub use engine::{EntityAnalysis, EvidenceEngine};
pub use input::{load_entities, parse_entities};
