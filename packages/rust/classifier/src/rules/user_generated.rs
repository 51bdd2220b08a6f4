//! Fallback rule.

use citelens_shared::{ClassificationResult, ReferenceData, SourceType};

use super::{ClassificationRule, Subject};

/// Matches every citation; always registered last.
pub struct UserGeneratedRule;

impl ClassificationRule for UserGeneratedRule {
    fn classify(
        &self,
        _subject: &Subject,
        _reference: &ReferenceData,
    ) -> Option<ClassificationResult> {
        Some(ClassificationResult::of(SourceType::UserGenerated))
    }

    fn name(&self) -> &str {
        "user_generated"
    }
}
