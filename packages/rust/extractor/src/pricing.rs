//! Price extraction.

use std::sync::LazyLock;

use citelens_shared::FactType;
use regex::Regex;

use crate::Candidate;

/// `$49`, `$1,200.00 per year`, `$15/hr`.
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\$[ \t]?\d+(?:,\d{3})*(?:\.\d{1,2})?(?:[ \t]*(?:per|/)[ \t]*(?:month|year|mo|yr|hour|hr|day)\b)?",
    )
    .expect("price regex")
});

static STARTING_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:prices start at|starting at|from)[ \t]+\$[ \t]?\d+(?:,\d{3})*(?:\.\d{1,2})?")
        .expect("starting price regex")
});

const PRICE_CONFIDENCE: f64 = 0.9;
const STARTING_PRICE_CONFIDENCE: f64 = 0.8;

pub(crate) fn extract(text: &str) -> Vec<Candidate> {
    let prices = PRICE_RE
        .find_iter(text)
        .map(|m| Candidate::new(FactType::Pricing, m.as_str(), PRICE_CONFIDENCE));

    let starting = STARTING_PRICE_RE
        .find_iter(text)
        .map(|m| Candidate::new(FactType::Pricing, m.as_str(), STARTING_PRICE_CONFIDENCE));

    prices.chain(starting).collect()
}
