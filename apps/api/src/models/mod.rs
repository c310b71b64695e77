pub mod candidate;
pub mod job;
pub mod recommendation;

use std::collections::BTreeSet;

/// Splits a comma-delimited skill field into a normalized set:
/// lower-cased, whitespace-trimmed, empties dropped.
pub fn normalize_skill_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
