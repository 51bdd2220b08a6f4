//! Per-type value normalization.
//!
//! Every normalizer is idempotent: `normalize(t, &normalize(t, x)) == normalize(t, x)`.

use citelens_shared::FactType;

/// Normalize a raw fact value into its comparison key.
pub fn normalize(fact_type: FactType, value: &str) -> String {
    match fact_type {
        FactType::Address => {
            let stripped: String = value.chars().filter(|c| *c != ',' && *c != '.').collect();
            collapse_whitespace(&stripped.to_lowercase())
        }
        FactType::Hours => {
            let stripped: String = value.chars().filter(|c| *c != '.').collect();
            collapse_whitespace(&stripped.to_lowercase())
        }
        FactType::Phone => value.chars().filter(char::is_ascii_digit).collect(),
        FactType::Services | FactType::Features => value.trim().to_lowercase(),
        FactType::Pricing => {
            let stripped: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
            collapse_whitespace(&stripped.to_lowercase())
        }
    }
}

/// Trim and collapse internal whitespace runs to a single space.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
