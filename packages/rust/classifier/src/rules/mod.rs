//! Classification rule trait and the built-in rules.
//!
//! Rules are evaluated in [`SourceType`] priority order and the first rule
//! that returns a result wins. [`UserGeneratedRule`] always matches and is
//! always last, which makes classification total.

mod curated;
mod directory;
mod licensed;
mod reddit;
mod user_generated;

use citelens_shared::{CitationRecord, ClassificationResult, ReferenceData, normalize_domain};

use crate::domain::host_from_url;

pub use curated::CuratedRule;
pub use directory::DirectoryRule;
pub use licensed::LicensedPublisherRule;
pub use reddit::RedditRule;
pub use user_generated::UserGeneratedRule;

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// Pre-normalized view of a citation, computed once per classification.
#[derive(Debug, Clone)]
pub struct Subject {
    /// Normalized citation domain, falling back to the URL host when the
    /// reported domain is blank.
    pub domain: String,
    /// Normalized URL host, `None` when the URL does not parse.
    pub host: Option<String>,
    /// Lowercased, trimmed full URL.
    pub url: String,
}

impl Subject {
    pub fn new(citation: &CitationRecord) -> Self {
        let host = host_from_url(&citation.url);
        let mut domain = normalize_domain(&citation.domain);
        if domain.is_empty() {
            domain = host.clone().unwrap_or_default();
        }
        Self {
            domain,
            host,
            url: citation.url.trim().to_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One tier of the classification taxonomy.
pub trait ClassificationRule: Send + Sync {
    /// Return a result if this rule claims the citation.
    fn classify(
        &self,
        subject: &Subject,
        reference: &ReferenceData,
    ) -> Option<ClassificationResult>;

    /// Rule name for tracing.
    fn name(&self) -> &str;
}
