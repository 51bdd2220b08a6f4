//! Opening-hours extraction.

use std::sync::LazyLock;

use citelens_shared::FactType;
use regex::Regex;

use crate::{Candidate, overlaps};

const DAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues|tue|wed|thurs|thu|fri|sat|sun)";
const RANGE_SEP: &str = r"(?:-|–|—|to|through|thru)";
const MERIDIEM: &str = r"(?:[ap]\.m\.?|[ap]m\b)";

/// `Mon-Fri 9am-5pm`, `Saturday: 10:00 to 14:00`, `Monday through Friday, 9am to 5pm`.
static DAY_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{DAY}\b\.?(?:[ \t]*{RANGE_SEP}[ \t]*{DAY}\b\.?)?[ \t]*[,:]?[ \t]*\d{{1,2}}(?::\d{{2}})?[ \t]*{MERIDIEM}?[ \t]*{RANGE_SEP}[ \t]*\d{{1,2}}(?::\d{{2}})?(?:[ \t]*{MERIDIEM})?"
    ))
    .expect("day range regex")
});

/// `9am - 5pm` with no day attached. The closing meridiem is required so
/// phone fragments like `555-0142` never match.
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b\d{{1,2}}(?::\d{{2}})?[ \t]*{MERIDIEM}?[ \t]*{RANGE_SEP}[ \t]*\d{{1,2}}(?::\d{{2}})?[ \t]*{MERIDIEM}"
    ))
    .expect("time range regex")
});

static ALWAYS_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)24/7|\b24[ \t]*hours\b|\balways open\b|\bopen 24\b|\bround[ -]the[ -]clock\b")
        .expect("always open regex")
});

const DAY_RANGE_CONFIDENCE: f64 = 0.9;
const TIME_RANGE_CONFIDENCE: f64 = 0.7;
const ALWAYS_OPEN_CONFIDENCE: f64 = 0.9;

/// Canonical value for every always-open phrase.
pub(crate) const ALWAYS_OPEN: &str = "24/7";

pub(crate) fn extract(text: &str) -> Vec<Candidate> {
    let mut facts = Vec::new();
    let mut day_spans = Vec::new();

    for m in DAY_RANGE_RE.find_iter(text) {
        day_spans.push(m.range());
        facts.push(Candidate::new(FactType::Hours, m.as_str(), DAY_RANGE_CONFIDENCE));
    }

    for m in TIME_RANGE_RE.find_iter(text) {
        if day_spans.iter().any(|span| overlaps(span, &m.range())) {
            continue;
        }
        facts.push(Candidate::new(FactType::Hours, m.as_str(), TIME_RANGE_CONFIDENCE));
    }

    if ALWAYS_OPEN_RE.is_match(text) {
        facts.push(Candidate::new(FactType::Hours, ALWAYS_OPEN, ALWAYS_OPEN_CONFIDENCE));
    }

    facts
}
