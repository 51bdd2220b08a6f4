//! Curated rule: allowlist, institutional TLDs, root-domain allowlist, and a
//! last-chance `wikipedia` substring check.

use citelens_shared::{ClassificationResult, ReferenceData, SourceType};

use super::{ClassificationRule, Subject};
use crate::domain::root_domain;

pub struct CuratedRule;

impl ClassificationRule for CuratedRule {
    fn classify(
        &self,
        subject: &Subject,
        reference: &ReferenceData,
    ) -> Option<ClassificationResult> {
        let allowlist = &reference.curated.domains;
        let domain = subject.domain.as_str();

        let matched = allowlist.contains(domain)
            || is_institutional(domain)
            || root_domain(domain).is_some_and(|root| allowlist.contains(root))
            || domain.contains("wikipedia");

        matched.then(|| ClassificationResult::of(SourceType::Curated))
    }

    fn name(&self) -> &str {
        "curated"
    }
}

/// `.edu` / `.gov` registrations, including country-coded forms like `.gov.uk`.
fn is_institutional(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let institutional = |label: &str| label == "edu" || label == "gov";
    match labels.as_slice() {
        [.., second, last] if institutional(*last) => !second.is_empty(),
        [.., _, second, last] if last.len() == 2 => institutional(*second),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn institutional_tlds() {
        assert!(is_institutional("mit.edu"));
        assert!(is_institutional("cdc.gov"));
        assert!(is_institutional("ons.gov.uk"));
        assert!(!is_institutional("edu"));
        assert!(!is_institutional("education.com"));
        assert!(!is_institutional("gov.example.com"));
        assert!(!is_institutional("data.gov.example.com"));
    }
}
