//! Dotted field paths
//!
//! Paths address nested fields of a candidate record, e.g.
//! `operatorConfiguration.dbt.gitRepoUrl`. The root is the empty path.

use super::rules::UNKNOWN_PATH;
use crate::error::ValidationFailure;
use serde_json::Value;

/// Join a parent path and a field name
pub fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Split a dotted path into its segments
///
/// Empty paths and empty segments (`a..b`, `.a`) are rejected.
pub fn segments(path: &str) -> Result<Vec<&str>, ValidationFailure> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(ValidationFailure::new(path, UNKNOWN_PATH));
    }
    Ok(parts)
}

/// Look up the value at a dotted path
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}
