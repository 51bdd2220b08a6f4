//! Phone number extraction.

use std::sync::LazyLock;

use citelens_shared::FactType;
use regex::Regex;

use crate::{Candidate, overlaps};

static US_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[ .-]?)?\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4}\b").expect("US phone regex")
});

/// `+` and a country code, then grouped digits. A bare `00` trunk prefix is
/// not accepted; it cannot be told apart from a zero-padded id.
static INTL_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+[1-9]\d{0,2}(?:[ .-]?\(?\d{1,4}\)?){2,5}").expect("intl phone regex")
});

const US_CONFIDENCE: f64 = 0.9;
const INTL_CONFIDENCE: f64 = 0.7;

const US_MIN_DIGITS: usize = 10;
const INTL_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

pub(crate) fn extract(text: &str) -> Vec<Candidate> {
    let mut facts = Vec::new();
    let mut us_spans = Vec::new();

    for m in US_PHONE_RE.find_iter(text) {
        // Embedded in a longer digit run (order ids, timestamps).
        if preceded_by_digit(text, m.start()) {
            continue;
        }
        if digit_count(m.as_str()) < US_MIN_DIGITS {
            continue;
        }
        us_spans.push(m.range());
        facts.push(Candidate::new(FactType::Phone, m.as_str(), US_CONFIDENCE));
    }

    for m in INTL_PHONE_RE.find_iter(text) {
        if us_spans.iter().any(|span| overlaps(span, &m.range())) {
            continue;
        }
        if preceded_by_digit(text, m.start()) || followed_by_digit(text, m.end()) {
            continue;
        }
        if !INTL_DIGITS.contains(&digit_count(m.as_str())) {
            continue;
        }
        facts.push(Candidate::new(FactType::Phone, m.as_str(), INTL_CONFIDENCE));
    }

    facts
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

fn preceded_by_digit(text: &str, start: usize) -> bool {
    text[..start].chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

fn followed_by_digit(text: &str, end: usize) -> bool {
    text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
}
