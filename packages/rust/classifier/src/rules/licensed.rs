//! Licensed publisher rule: exact domain, then root domain.

use citelens_shared::{ClassificationResult, ReferenceData, SourceType};

use super::{ClassificationRule, Subject};
use crate::domain::root_domain;

pub struct LicensedPublisherRule;

impl ClassificationRule for LicensedPublisherRule {
    fn classify(
        &self,
        subject: &Subject,
        reference: &ReferenceData,
    ) -> Option<ClassificationResult> {
        let publishers = &reference.publishers;
        let name = publishers.get(&subject.domain).or_else(|| {
            root_domain(&subject.domain).and_then(|root| publishers.get(root))
        })?;

        Some(ClassificationResult {
            is_licensed: Some(true),
            publisher_name: Some(name.clone()),
            ..ClassificationResult::of(SourceType::LicensedPublisher)
        })
    }

    fn name(&self) -> &str {
        "licensed_publisher"
    }
}
