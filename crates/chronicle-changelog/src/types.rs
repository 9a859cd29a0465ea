//! Changelog types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chronicle_git::Signature;
use serde::{Deserialize, Serialize};

/// Named values captured by a pattern rule.
///
/// A name that is present with an empty value (an optional capture group
/// that did not participate) is distinct from a name that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field; `None` when the name was never captured
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether the field name is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Field names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fields captured from a merge subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    pub fields: Fields,
}

/// Fields captured from a revert subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    pub fields: Fields,
}

/// A titled block of text found in a commit body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The keyword that opened the note
    pub title: String,
    /// Text following the keyword up to the next blank line
    pub body: String,
}

/// A parsed commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full hash
    pub hash: String,
    /// Abbreviated hash
    pub short_hash: String,
    pub author: Signature,
    pub committer: Signature,
    /// Raw subject line
    pub header: String,
    /// Raw body
    pub body: String,
    /// Header fields; `None` when the header rule did not match
    pub fields: Option<Fields>,
    pub merge: Option<Merge>,
    pub revert: Option<Revert>,
    /// `@name` tokens, first occurrence order
    pub mentions: Vec<String>,
    /// Referenced issue numbers, first occurrence order
    pub issues: Vec<String>,
    pub notes: Vec<Note>,
}

impl Commit {
    /// Look up a field by name.
    ///
    /// Header fields win; otherwise a few built-in names resolve to commit
    /// metadata: `Hash`, `ShortHash`, `Header`, `Body`, `AuthorName`,
    /// `AuthorEmail`, `CommitterName`, `CommitterEmail`.
    pub fn field(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.fields.as_ref().and_then(|f| f.get(name)) {
            return Some(value);
        }

        match name {
            "Hash" => Some(self.hash.as_str()),
            "ShortHash" => Some(self.short_hash.as_str()),
            "Header" => Some(self.header.as_str()),
            "Body" => Some(self.body.as_str()),
            "AuthorName" => Some(self.author.name.as_str()),
            "AuthorEmail" => Some(self.author.email.as_str()),
            "CommitterName" => Some(self.committer.name.as_str()),
            "CommitterEmail" => Some(self.committer.email.as_str()),
            _ => None,
        }
    }

    /// Whether the merge rule matched
    pub fn is_merge(&self) -> bool {
        self.merge.is_some()
    }

    /// Whether the revert rule matched
    pub fn is_revert(&self) -> bool {
        self.revert.is_some()
    }
}

/// Commits sharing one group-by value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGroup {
    /// The group-by value
    pub raw_title: String,
    /// Display title from the title map, or the raw value
    pub title: String,
    pub commits: Vec<Commit>,
}

/// Notes sharing one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
    pub title: String,
    pub notes: Vec<Note>,
}

/// A neighbouring tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTag {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// A version boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub date: DateTime<Utc>,
    /// Chronologically older neighbour
    pub previous: Option<RelatedTag>,
    /// Chronologically newer neighbour
    pub next: Option<RelatedTag>,
}

impl Tag {
    /// Create an unlinked tag
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date,
            previous: None,
            next: None,
        }
    }

    /// The name and date of this tag, for linking from a neighbour
    pub fn related(&self) -> RelatedTag {
        RelatedTag {
            name: self.name.clone(),
            date: self.date,
        }
    }
}

/// The changelog entry for one tag, or for the unreleased head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub tag: Tag,
    /// True for the synthetic head covering commits after the newest tag
    pub unreleased: bool,
    pub commit_groups: Vec<CommitGroup>,
    /// Merge commits, newest first
    pub merge_commits: Vec<Commit>,
    /// Revert commits, oldest first
    pub revert_commits: Vec<Commit>,
    pub note_groups: Vec<NoteGroup>,
}

impl Version {
    /// Whether nothing would be rendered for this version
    pub fn is_empty(&self) -> bool {
        self.commit_groups.is_empty()
            && self.merge_commits.is_empty()
            && self.revert_commits.is_empty()
            && self.note_groups.is_empty()
    }
}

/// Repository metadata handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub title: String,
    pub repository_url: String,
}

/// The assembled changelog: versions newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogTree {
    pub info: RepositoryInfo,
    pub versions: Vec<Version>,
}
