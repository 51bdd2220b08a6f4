//! Source classification for web citations.
//!
//! This crate provides:
//! - [`SourceClassifier`]: maps a citation to exactly one [`SourceType`]
//! - [`rules`]: the ordered classification rules it evaluates
//! - [`domain`]: hostname helpers (URL host parsing, root domains)
//!
//! Classification is a pure function of the citation and the injected
//! [`ReferenceData`]; malformed URLs degrade to substring checks instead of
//! failing.

pub mod domain;
pub mod rules;

use std::sync::Arc;

use citelens_shared::{CitationRecord, ClassificationResult, ReferenceData, SourceType};
use tracing::debug;

pub use rules::{
    ClassificationRule, CuratedRule, DirectoryRule, LicensedPublisherRule, RedditRule, Subject,
    UserGeneratedRule,
};

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Holds the reference tables and the rules in priority order.
pub struct SourceClassifier {
    reference: Arc<ReferenceData>,
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl SourceClassifier {
    /// Create a classifier with all built-in rules (licensed publisher first,
    /// user-generated last).
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            rules: vec![
                Box::new(LicensedPublisherRule),
                Box::new(RedditRule),
                Box::new(DirectoryRule),
                Box::new(CuratedRule),
                Box::new(UserGeneratedRule),
            ],
        }
    }

    /// Classify one citation. Always returns a result.
    pub fn classify(&self, citation: &CitationRecord) -> ClassificationResult {
        let subject = Subject::new(citation);

        for rule in &self.rules {
            if let Some(result) = rule.classify(&subject, &self.reference) {
                debug!(
                    rule = rule.name(),
                    domain = %subject.domain,
                    source_type = %result.source_type,
                    "citation classified"
                );
                return result;
            }
        }

        // Unreachable in practice: UserGeneratedRule always matches.
        ClassificationResult::of(SourceType::UserGenerated)
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for SourceClassifier {
    /// A classifier over empty reference tables.
    fn default() -> Self {
        Self::new(Arc::new(ReferenceData::default()))
    }
}
