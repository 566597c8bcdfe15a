//! Categorical label encoding with fallback

use std::collections::HashMap;

/// Map a categorical label to its trained score.
///
/// Labels absent from `table` resolve to `default`. Matching is exact and
/// case-sensitive.
pub fn encode(table: &HashMap<String, f64>, default: f64, label: &str) -> f64 {
    table.get(label).copied().unwrap_or(default)
}
