//! Street address and bare "City, ST ZIP" extraction.

use std::sync::LazyLock;

use citelens_shared::FactType;
use regex::Regex;

use crate::{Candidate, overlaps};

/// Number, one to five name words, then a street suffix.
static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b\d{1,6}[ \t]+(?:[a-z0-9][a-z0-9'.-]*[ \t]+){1,5}?",
        r"(?:street|st|avenue|ave|road|rd|boulevard|blvd|drive|dr|lane|ln|way|court|ct|plaza|pl)",
        r"\b\.?",
    ))
    .expect("street regex")
});

/// Optional unit, then `City, ST` and an optional ZIP, anchored at the end of
/// a street match and confined to the same line.
static TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:,?[ \t]*(?i:suite|ste|unit|apt|#)[ \t]*[A-Za-z0-9-]+)?,?[ \t]*",
        r"[A-Z][A-Za-z'-]*(?:[ \t]+[A-Z][A-Za-z'-]*){0,3},[ \t]*[A-Z]{2}\b",
        r"(?:[ \t]+\d{5}(?:-\d{4})?\b)?",
    ))
    .expect("address tail regex")
});

/// Case-insensitive fallback for [`TAIL_RE`]. Without capitals to go on, the
/// ZIP is required.
static LOWER_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:,?[ \t]*(?:suite|ste|unit|apt|#)[ \t]*[a-z0-9-]+)?,?[ \t]*",
        r"[a-z][a-z'-]*(?:[ \t]+[a-z][a-z'-]*){0,3},[ \t]*[a-z]{2}[ \t]+\d{5}(?:-\d{4})?\b",
    ))
    .expect("lowercase address tail regex")
});

static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b[A-Z][a-zA-Z]+(?:[ \t][A-Z][a-zA-Z]+)*,",
        r"[ \t]*(?i:[a-z]{2})[ \t]+\d{5}(?:-\d{4})?\b",
    ))
    .expect("city/state/zip regex")
});

/// Words that never appear between a house number and a street suffix.
const CONNECTIVES: &[&str] = &[
    "a", "an", "and", "at", "for", "from", "in", "near", "of", "on", "or", "our", "the", "to",
    "we", "with",
];

const EXTENDED_CONFIDENCE: f64 = 0.9;
const STREET_CONFIDENCE: f64 = 0.7;
const CITY_STATE_ZIP_CONFIDENCE: f64 = 0.8;

pub(crate) fn extract(text: &str) -> Vec<Candidate> {
    let mut facts = Vec::new();
    let mut extended_spans = Vec::new();

    let mut pos = 0;
    while let Some(m) = STREET_RE.find_at(text, pos) {
        if has_connective(m.as_str()) {
            // Retry just past this start; a real address may begin inside it.
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        pos = m.end();

        let rest = &text[m.end()..];
        match TAIL_RE.find(rest).or_else(|| LOWER_TAIL_RE.find(rest)) {
            Some(tail) => {
                let end = m.end() + tail.end();
                extended_spans.push(m.start()..end);
                facts.push(Candidate::new(
                    FactType::Address,
                    &text[m.start()..end],
                    EXTENDED_CONFIDENCE,
                ));
            }
            None => facts.push(Candidate::new(
                FactType::Address,
                m.as_str(),
                STREET_CONFIDENCE,
            )),
        }
    }

    // Only bare city/state/zip lines; ones already inside an extended street
    // address are not reported twice.
    for m in CITY_STATE_ZIP_RE.find_iter(text) {
        if extended_spans.iter().any(|span| overlaps(span, &m.range())) {
            continue;
        }
        facts.push(Candidate::new(
            FactType::Address,
            m.as_str(),
            CITY_STATE_ZIP_CONFIDENCE,
        ));
    }

    facts
}

/// Any name word between the number and the suffix is a connective.
fn has_connective(street: &str) -> bool {
    let words: Vec<&str> = street.split_whitespace().collect();
    let Some(names) = words.get(1..words.len().saturating_sub(1)) else {
        return false;
    };
    names
        .iter()
        .any(|w| CONNECTIVES.contains(&w.to_ascii_lowercase().as_str()))
}
