//! Keyword to metric resolution.
//!
//! Matching is case-insensitive substring containment over metric names in
//! declaration order, never token equality: `asset` matches both
//! `Total Assets` and `Other Assets`, and the first one declared wins.

use crate::statement::NormalizedTable;

pub fn contains_keyword(metric: &str, keyword: &str) -> bool {
    metric.to_lowercase().contains(&keyword.to_lowercase())
}

/// First metric whose name contains `keyword`, if any.
pub fn resolve_metric<'a>(table: &'a NormalizedTable, keyword: &str) -> Option<&'a str> {
    table
        .metrics()
        .iter()
        .find(|metric| contains_keyword(metric, keyword))
        .map(String::as_str)
}

/// Every metric matching any keyword, keyword-major and without repeats.
pub fn find_matching_columns<S: AsRef<str>>(table: &NormalizedTable, keywords: &[S]) -> Vec<String> {
    let mut matches: Vec<String> = Vec::new();
    for keyword in keywords {
        for metric in table.metrics() {
            if contains_keyword(metric, keyword.as_ref()) && !matches.contains(metric) {
                matches.push(metric.clone());
            }
        }
    }
    matches
}
