//! Directory rule: exact domain, then any directory domain inside the URL,
//! then the secondary keyword table.

use citelens_shared::{ClassificationResult, ReferenceData, SourceType};

use super::{ClassificationRule, Subject};

pub struct DirectoryRule;

impl ClassificationRule for DirectoryRule {
    fn classify(
        &self,
        subject: &Subject,
        reference: &ReferenceData,
    ) -> Option<ClassificationResult> {
        let (directory_type, fallback_name) = if let Some(entry) =
            reference.directories.get(&subject.domain)
        {
            (entry.directory_type.clone(), entry.name.clone())
        } else if let Some((_, entry)) = reference
            .directories
            .iter()
            .find(|(domain, _)| subject.url.contains(domain.as_str()))
        {
            (entry.directory_type.clone(), entry.name.clone())
        } else {
            let (_, kind) = reference.directory_keywords.iter().find(|(keyword, _)| {
                subject.domain.contains(keyword.as_str()) || subject.url.contains(keyword.as_str())
            })?;
            (kind.clone(), kind.clone())
        };

        let name = canonical_directory_name(&directory_type)
            .map(str::to_string)
            .unwrap_or(fallback_name);

        Some(ClassificationResult {
            directory_type: Some(directory_type),
            directory_name: Some(name),
            ..ClassificationResult::of(SourceType::Directory)
        })
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// One display name per well-known directory type.
pub fn canonical_directory_name(directory_type: &str) -> Option<&'static str> {
    let name = match directory_type {
        "gbp" => "Google Business Profile",
        "yelp" => "Yelp",
        "bbb" => "Better Business Bureau",
        "yellow_pages" => "Yellow Pages",
        "tripadvisor" => "Tripadvisor",
        "facebook" => "Facebook",
        "apple_maps" => "Apple Maps",
        "bing_places" => "Bing Places",
        "foursquare" => "Foursquare",
        "nextdoor" => "Nextdoor",
        "angi" => "Angi",
        _ => return None,
    };
    Some(name)
}
