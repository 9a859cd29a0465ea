//! Grouping and ordering of parsed commits

use std::cmp::Ordering;

use chronicle_core::config::CommitGroupsConfig;
use tracing::debug;

use crate::types::{Commit, CommitGroup, NoteGroup};

/// Partition commits by the group-by field, then order groups and commits.
///
/// Commits without the group-by field belong to no group. Groups start in
/// the order their key is first seen and are then sorted by `Title` or
/// `RawTitle`; any other group sort key leaves discovery order alone.
pub fn group_commits(
    commits: Vec<Commit>,
    config: &CommitGroupsConfig,
    commit_sort_by: &str,
) -> Vec<CommitGroup> {
    let mut groups: Vec<CommitGroup> = Vec::new();
    let mut ungrouped = 0usize;

    for commit in commits {
        let Some(key) = commit.field(&config.group_by).map(str::to_string) else {
            ungrouped += 1;
            continue;
        };

        match groups.iter_mut().find(|g| g.raw_title == key) {
            Some(group) => group.commits.push(commit),
            None => {
                let title = config
                    .title_maps
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| key.clone());
                groups.push(CommitGroup {
                    raw_title: key,
                    title,
                    commits: vec![commit],
                });
            }
        }
    }

    for group in &mut groups {
        sort_commits(&mut group.commits, commit_sort_by);
    }
    sort_groups(&mut groups, &config.sort_by);

    debug!(groups = groups.len(), ungrouped, "grouped commits");
    groups
}

/// Stable ascending sort by a field; commits lacking it go last.
/// An empty field name keeps the current order.
pub fn sort_commits(commits: &mut [Commit], sort_by: &str) {
    if sort_by.is_empty() {
        return;
    }
    commits.sort_by(|a, b| compare_present_first(a.field(sort_by), b.field(sort_by)));
}

/// Stable ascending sort of groups by `Title` or `RawTitle`
pub fn sort_groups(groups: &mut [CommitGroup], sort_by: &str) {
    match sort_by {
        "Title" => groups.sort_by(|a, b| a.title.cmp(&b.title)),
        "RawTitle" => groups.sort_by(|a, b| a.raw_title.cmp(&b.raw_title)),
        _ => {}
    }
}

/// Commits the merge rule matched, newest first
pub fn merge_commits(commits: &[Commit]) -> Vec<Commit> {
    commits.iter().filter(|c| c.is_merge()).cloned().collect()
}

/// Commits the revert rule matched, oldest first
pub fn revert_commits(commits: &[Commit]) -> Vec<Commit> {
    commits.iter().rev().filter(|c| c.is_revert()).cloned().collect()
}

/// Collect notes by title.
///
/// Titles appear in the order first seen; within a title, notes keep the
/// order they were found in, walking commits in log order.
pub fn note_groups(commits: &[Commit]) -> Vec<NoteGroup> {
    let mut groups: Vec<NoteGroup> = Vec::new();

    for note in commits.iter().flat_map(|c| c.notes.iter()) {
        match groups.iter_mut().find(|g| g.title == note.title) {
            Some(group) => group.notes.push(note.clone()),
            None => groups.push(NoteGroup {
                title: note.title.clone(),
                notes: vec![note.clone()],
            }),
        }
    }

    groups
}

fn compare_present_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fields, Merge, Note, Revert};
    use chrono::{TimeZone, Utc};
    use chronicle_git::Signature;

    fn commit(header: &str, fields: &[(&str, &str)]) -> Commit {
        let sig = Signature::new(
            "Ann",
            "ann@example.com",
            Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap(),
        );
        Commit {
            hash: header.to_string(),
            short_hash: header.to_string(),
            author: sig.clone(),
            committer: sig,
            header: header.to_string(),
            body: String::new(),
            fields: if fields.is_empty() {
                None
            } else {
                Some(fields.iter().copied().collect())
            },
            merge: None,
            revert: None,
            mentions: vec![],
            issues: vec![],
            notes: vec![],
        }
    }

    fn config() -> CommitGroupsConfig {
        let mut config = CommitGroupsConfig::default();
        config.title_maps.insert("feat".to_string(), "Features".to_string());
        config.title_maps.insert("fix".to_string(), "Bug Fixes".to_string());
        config
    }

    fn headers(group: &CommitGroup) -> Vec<&str> {
        group.commits.iter().map(|c| c.header.as_str()).collect()
    }

    #[test]
    fn test_groups_sorted_by_title() {
        let commits = vec![
            commit("f1", &[("Type", "feat"), ("Scope", "b")]),
            commit("x1", &[("Type", "fix"), ("Scope", "a")]),
            commit("f2", &[("Type", "feat"), ("Scope", "a")]),
        ];
        let groups = group_commits(commits, &config(), "Scope");

        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Bug Fixes", "Features"]);
        assert_eq!(headers(&groups[1]), vec!["f2", "f1"]);
    }

    #[test]
    fn test_title_falls_back_to_raw_key() {
        let groups = group_commits(vec![commit("d", &[("Type", "docs")])], &config(), "Scope");
        assert_eq!(groups[0].title, "docs");
        assert_eq!(groups[0].raw_title, "docs");
    }

    #[test]
    fn test_sort_by_raw_title_and_discovery_order() {
        let commits = || {
            vec![
                commit("a", &[("Type", "fix")]),
                commit("b", &[("Type", "feat")]),
            ]
        };

        let mut cfg = config();
        cfg.sort_by = "RawTitle".to_string();
        let groups = group_commits(commits(), &cfg, "");
        assert_eq!(groups[0].raw_title, "feat");

        cfg.sort_by = String::new();
        let groups = group_commits(commits(), &cfg, "");
        assert_eq!(groups[0].raw_title, "fix");
    }

    #[test]
    fn test_commits_missing_sort_field_go_last() {
        let mut commits = vec![
            commit("none", &[("Type", "feat")]),
            commit("b", &[("Type", "feat"), ("Scope", "b")]),
            commit("a", &[("Type", "feat"), ("Scope", "a")]),
        ];
        sort_commits(&mut commits, "Scope");
        let order: Vec<&str> = commits.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "none"]);
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let mut commits = vec![
            commit("lower", &[("Scope", "api")]),
            commit("upper", &[("Scope", "Zed")]),
        ];
        sort_commits(&mut commits, "Scope");
        assert_eq!(commits[0].header, "upper");
    }

    #[test]
    fn test_commits_without_group_field_are_dropped() {
        let groups = group_commits(
            vec![commit("Merge pull request #1 from x", &[])],
            &config(),
            "Scope",
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn test_merge_and_revert_collections() {
        let mut m1 = commit("merge newer", &[]);
        m1.merge = Some(Merge { fields: Fields::new() });
        let mut r1 = commit("revert newer", &[]);
        r1.revert = Some(Revert { fields: Fields::new() });
        let mut m2 = commit("merge older", &[]);
        m2.merge = Some(Merge { fields: Fields::new() });
        let mut r2 = commit("revert older", &[]);
        r2.revert = Some(Revert { fields: Fields::new() });

        let commits = vec![m1, r1, m2, r2];
        let merges: Vec<String> = merge_commits(&commits).into_iter().map(|c| c.header).collect();
        let reverts: Vec<String> = revert_commits(&commits).into_iter().map(|c| c.header).collect();

        assert_eq!(merges, vec!["merge newer", "merge older"]);
        assert_eq!(reverts, vec!["revert older", "revert newer"]);
    }

    #[test]
    fn test_note_groups_keep_discovery_order() {
        let note = |title: &str, body: &str| Note {
            title: title.to_string(),
            body: body.to_string(),
        };
        let mut newer = commit("newer", &[]);
        newer.notes = vec![note("BREAKING CHANGE", "newer"), note("DEPRECATED", "d")];
        let mut older = commit("older", &[]);
        older.notes = vec![note("BREAKING CHANGE", "older")];

        let groups = note_groups(&[newer, older]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "BREAKING CHANGE");
        let bodies: Vec<&str> = groups[0].notes.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, vec!["newer", "older"]);
        assert_eq!(groups[1].title, "DEPRECATED");
    }
}
