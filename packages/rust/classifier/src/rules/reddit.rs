//! Reddit rule: URL hostname lookup with a substring fallback for URLs that
//! do not parse or live on unlisted hosts.

use citelens_shared::{ClassificationResult, ReferenceData, SourceType};

use super::{ClassificationRule, Subject};
use crate::domain::root_domain;

pub struct RedditRule;

impl ClassificationRule for RedditRule {
    fn classify(
        &self,
        subject: &Subject,
        reference: &ReferenceData,
    ) -> Option<ClassificationResult> {
        let table = &reference.reddit;

        let host_hit = subject.host.as_deref().is_some_and(|host| {
            table.domains.contains(host)
                || root_domain(host).is_some_and(|root| table.domains.contains(root))
        });

        let pattern_hit = || {
            table
                .patterns
                .iter()
                .any(|pattern| subject.url.contains(pattern.as_str()))
        };

        if host_hit || pattern_hit() {
            Some(ClassificationResult::of(SourceType::Reddit))
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "reddit"
    }
}
