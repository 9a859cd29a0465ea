//! Commit filtering by field allow-lists

use std::collections::BTreeMap;

use tracing::debug;

use crate::types::Commit;

/// Whether `commit` passes every filter.
///
/// Each configured field must be present with a value from its allow-list.
/// An empty filter map accepts everything.
pub fn matches(commit: &Commit, filters: &BTreeMap<String, Vec<String>>) -> bool {
    filters.iter().all(|(field, allowed)| {
        commit
            .field(field)
            .is_some_and(|value| allowed.iter().any(|a| a == value))
    })
}

/// Keep the commits that pass every filter, preserving order
pub fn filter_commits(commits: Vec<Commit>, filters: &BTreeMap<String, Vec<String>>) -> Vec<Commit> {
    if filters.is_empty() {
        return commits;
    }

    let before = commits.len();
    let kept: Vec<Commit> = commits.into_iter().filter(|c| matches(c, filters)).collect();
    debug!(before, after = kept.len(), "filtered commits");
    kept
}
