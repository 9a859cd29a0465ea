//! Markdown changelog formatter

use tracing::{debug, instrument};

use chronicle_core::config::OutputConfig;

use super::ChangelogFormatter;
use crate::types::{ChangelogTree, Commit, Version};

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    /// Print the tree title as a top-level heading
    pub include_title: bool,
    /// Field holding the scope shown in bold before each subject
    pub scope_field: String,
    /// Field holding the text of each entry
    pub subject_field: String,
    /// Field of the revert rule holding the reverted header
    pub revert_field: String,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_title: false,
            scope_field: "Scope".to_string(),
            subject_field: "Subject".to_string(),
            revert_field: "Header".to_string(),
        }
    }

    /// Formatter reading scope and subject from the configured fields
    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new().with_fields(&output.scope_field, &output.subject_field)
    }

    /// Print the title heading
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Read scope and subject from other header fields
    pub fn with_fields(mut self, scope: impl Into<String>, subject: impl Into<String>) -> Self {
        self.scope_field = scope.into();
        self.subject_field = subject.into();
        self
    }

    fn entry(&self, commit: &Commit) -> String {
        let subject = commit
            .field(&self.subject_field)
            .filter(|s| !s.is_empty())
            .unwrap_or(commit.header.as_str());

        match commit.field(&self.scope_field).filter(|s| !s.is_empty()) {
            Some(scope) => format!("* **{}:** {}", scope, subject),
            None => format!("* {}", subject),
        }
    }

    fn version(&self, out: &mut String, version: &Version) {
        let tag = &version.tag;
        out.push_str(&format!("<a name=\"{}\"></a>\n", tag.name));
        out.push_str(&format!("## {} ({})\n", tag.name, tag.date.format("%Y-%m-%d")));

        for group in &version.commit_groups {
            out.push_str(&format!("\n### {}\n\n", group.title));
            for commit in &group.commits {
                out.push_str(&self.entry(commit));
                out.push('\n');
            }
        }

        if !version.revert_commits.is_empty() {
            out.push_str("\n### Reverts\n\n");
            for commit in &version.revert_commits {
                let header = commit
                    .revert
                    .as_ref()
                    .and_then(|r| r.fields.get(&self.revert_field))
                    .unwrap_or(commit.header.as_str());
                out.push_str(&format!("* {}\n", header));
            }
        }

        if !version.merge_commits.is_empty() {
            out.push_str("\n### Pull Requests\n\n");
            for commit in &version.merge_commits {
                out.push_str(&format!("* {}\n", commit.header));
            }
        }

        for group in &version.note_groups {
            out.push_str(&format!("\n### {}\n\n", group.title));
            for note in &group.notes {
                out.push_str(&format!("{}\n\n", note.body));
            }
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, tree), fields(versions = tree.versions.len()))]
    fn format(&self, tree: &ChangelogTree) -> String {
        let mut output = String::new();

        if self.include_title && !tree.info.title.is_empty() {
            output.push_str(&format!("# {}\n\n", tree.info.title));
        }

        for version in &tree.versions {
            self.version(&mut output, version);
            output.push_str("\n\n");
        }

        let mut output = output.trim_end().to_string();
        output.push('\n');

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
