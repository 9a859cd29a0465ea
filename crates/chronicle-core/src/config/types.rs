//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for chronicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository metadata handed to the renderer
    pub info: InfoConfig,

    /// Parsing, filtering and grouping options
    pub options: OptionsConfig,

    /// Tag selection
    pub tags: TagsConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Repository metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    /// Changelog title
    pub title: String,

    /// Repository URL used for links
    pub repository_url: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: "CHANGELOG".to_string(),
            repository_url: String::new(),
        }
    }
}

/// Options consumed by the parsing and assembly engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub commits: CommitsConfig,
    pub commit_groups: CommitGroupsConfig,
    pub header: PatternConfig,
    pub issues: IssuesConfig,
    pub merges: PatternConfig,
    pub reverts: PatternConfig,
    pub notes: NotesConfig,
}

/// Commit filtering and ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitsConfig {
    /// Field name to allowed values; every listed field must match
    pub filters: BTreeMap<String, Vec<String>>,

    /// Field used to order commits inside a group
    pub sort_by: String,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        let mut filters = BTreeMap::new();
        filters.insert(
            "Type".to_string(),
            vec!["feat".to_string(), "fix".to_string()],
        );

        Self {
            filters,
            sort_by: "Scope".to_string(),
        }
    }
}

/// Commit grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitGroupsConfig {
    /// Field whose value becomes the group key
    pub group_by: String,

    /// Group attribute used to order groups (`Title` or `RawTitle`)
    pub sort_by: String,

    /// Group key to display title
    pub title_maps: BTreeMap<String, String>,
}

impl Default for CommitGroupsConfig {
    fn default() -> Self {
        let mut title_maps = BTreeMap::new();
        title_maps.insert("feat".to_string(), "Features".to_string());
        title_maps.insert("fix".to_string(), "Bug Fixes".to_string());

        Self {
            group_by: "Type".to_string(),
            sort_by: "Title".to_string(),
            title_maps,
        }
    }
}

/// A regular expression and the field names its capture groups map to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Regular expression; empty disables the rule
    pub pattern: String,

    /// Field names assigned to capture groups, in order
    pub pattern_maps: Vec<String>,
}

impl PatternConfig {
    /// Create a pattern config
    pub fn new(pattern: impl Into<String>, maps: &[&str]) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_maps: maps.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Whether the rule is switched on
    pub fn is_enabled(&self) -> bool {
        !self.pattern.is_empty()
    }

    /// Default conventional-commit header rule
    pub fn default_header() -> Self {
        Self::new(
            r"^(\w*)(?:\(([\w\$\.\-\*\s]*)\))?\:\s(.*)$",
            &["Type", "Scope", "Subject"],
        )
    }

    /// Default pull-request merge rule
    pub fn default_merge() -> Self {
        Self::new(r"^Merge pull request #(\d+) from (.*)$", &["Ref", "Source"])
    }

    /// Default revert rule
    pub fn default_revert() -> Self {
        Self::new(r#"^Revert "([\s\S]*)"$"#, &["Header"])
    }
}

/// Issue reference detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuesConfig {
    /// Literal prefixes that precede an issue number
    pub prefix: Vec<String>,
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            prefix: vec!["#".to_string(), "gh-".to_string()],
        }
    }
}

/// Embedded note detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Keywords that open a note block
    pub keywords: Vec<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["BREAKING CHANGE".to_string()],
        }
    }
}

/// Tag selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Only tags whose names match this expression become versions
    pub filter: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Name given to the version covering commits after the newest tag
    pub unreleased_title: String,

    /// Header field printed in bold before each entry
    pub scope_field: String,

    /// Header field holding the entry text
    pub subject_field: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            unreleased_title: "Unreleased".to_string(),
            scope_field: "Scope".to_string(),
            subject_field: "Subject".to_string(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            commits: CommitsConfig::default(),
            commit_groups: CommitGroupsConfig::default(),
            header: PatternConfig::default_header(),
            issues: IssuesConfig::default(),
            merges: PatternConfig::default_merge(),
            reverts: PatternConfig::default_revert(),
            notes: NotesConfig::default(),
        }
    }
}
