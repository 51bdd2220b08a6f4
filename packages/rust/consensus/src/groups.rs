//! Value groups for one fact type.

use std::collections::{BTreeSet, HashMap};

use citelens_shared::{ExtractedFact, SourceType};

/// Facts sharing one consensus key.
#[derive(Debug)]
pub(crate) struct ValueGroup<'a> {
    pub key: String,
    pub facts: Vec<&'a ExtractedFact>,
    pub source_types: BTreeSet<SourceType>,
}

/// Groups in first-encountered order.
pub(crate) fn group_by_value<'a>(facts: &[&'a ExtractedFact]) -> Vec<ValueGroup<'a>> {
    let mut groups: Vec<ValueGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &fact in facts {
        let key = fact.consensus_key();
        let idx = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(ValueGroup {
                key,
                facts: Vec::new(),
                source_types: BTreeSet::new(),
            });
            groups.len() - 1
        });
        groups[idx].facts.push(fact);
        groups[idx].source_types.insert(fact.source_type);
    }

    groups
}

/// Index of the largest group; ties keep the earliest.
pub(crate) fn most_common(groups: &[ValueGroup<'_>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, group) in groups.iter().enumerate() {
        match best {
            Some(b) if groups[b].facts.len() >= group.facts.len() => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// For every pair of values whose source-type sets are disjoint, add the
/// size of the smaller group. A value that disagrees with several
/// independent values is counted once per disagreement.
pub(crate) fn contradiction_count(groups: &[ValueGroup<'_>]) -> usize {
    let mut count = 0;
    for (i, a) in groups.iter().enumerate() {
        for b in &groups[i + 1..] {
            if a.source_types.is_empty() || b.source_types.is_empty() {
                continue;
            }
            if a.source_types.is_disjoint(&b.source_types) {
                count += a.facts.len().min(b.facts.len());
            }
        }
    }
    count
}
