//! Service and feature extraction: trigger-phrase lists plus a service
//! keyword vocabulary.

use std::collections::HashSet;
use std::sync::LazyLock;

use citelens_shared::FactType;
use regex::Regex;

use crate::Candidate;

/// `Services: a, b, c` / `we offer a, b` / `X provides a, b`. The list runs to
/// the end of the sentence or line.
static SERVICE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:services|offerings)[ \t]*:[ \t]*([^\n.;]+)|\b(?:we offer|provides)[ \t]+([^\n.;]+)")
        .expect("service list regex")
});

static FEATURE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:features|amenities|includes)[ \t]*:[ \t]*([^\n.;]+)")
        .expect("feature list regex")
});

static SERVICE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:consulting|development|design|marketing|support|hosting|cloud|saas|software|platform|solution|services?|offerings?)\b",
    )
    .expect("service keyword regex")
});

const LIST_ITEM_CONFIDENCE: f64 = 0.8;
const KEYWORD_CONFIDENCE: f64 = 0.6;

/// List items must be longer than 2 and shorter than 100 characters.
const MIN_ITEM_LEN: usize = 3;
const MAX_ITEM_LEN: usize = 99;

pub(crate) fn extract_services(text: &str) -> Vec<Candidate> {
    let mut facts = Vec::new();

    for caps in SERVICE_LIST_RE.captures_iter(text) {
        let Some(list) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        facts.extend(list_items(FactType::Services, list.as_str()));
    }

    let mut seen = HashSet::new();
    for m in SERVICE_KEYWORD_RE.find_iter(text) {
        if seen.insert(m.as_str().to_lowercase()) {
            facts.push(Candidate::new(FactType::Services, m.as_str(), KEYWORD_CONFIDENCE));
        }
    }

    facts
}

pub(crate) fn extract_features(text: &str) -> Vec<Candidate> {
    FEATURE_LIST_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|list| list_items(FactType::Features, list.as_str()))
        .collect()
}

/// Split a comma-separated list into candidates, dropping a leading
/// conjunction from each item.
fn list_items(fact_type: FactType, list: &str) -> Vec<Candidate> {
    list.split(',')
        .map(str::trim)
        .map(|item| {
            item.strip_prefix("and ")
                .or_else(|| item.strip_prefix("or "))
                .unwrap_or(item)
                .trim()
        })
        .filter(|item| (MIN_ITEM_LEN..=MAX_ITEM_LEN).contains(&item.chars().count()))
        .map(|item| Candidate::new(fact_type, item, LIST_ITEM_CONFIDENCE))
        .collect()
}
