//! In-memory log source

use chrono::{DateTime, Utc};
use tracing::warn;

use chronicle_core::error::GitError;

use crate::log::LogSource;
use crate::repository::Result;
use crate::types::{LogRecord, RevisionRange, Signature, TagInfo};

/// A linear commit history held in memory.
///
/// Commits are appended oldest first and tags attach to the latest commit,
/// which makes it easy to describe a history without touching disk:
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chronicle_git::{LogSource, MemoryLog, RevisionRange};
///
/// let mut log = MemoryLog::new();
/// log.commit("feat: first", Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap())
///     .tag("1.0.0");
///
/// let text = log.log(&RevisionRange::until("1.0.0")).unwrap();
/// assert!(text.contains("feat: first"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLog {
    records: Vec<LogRecord>,
    tags: Vec<(String, usize)>,
    author_name: String,
    author_email: String,
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            tags: Vec::new(),
            author_name: "chronicle".to_string(),
            author_email: "chronicle@localhost".to_string(),
        }
    }
}

impl MemoryLog {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author used for subsequent `commit` calls
    pub fn author(&mut self, name: impl Into<String>, email: impl Into<String>) -> &mut Self {
        self.author_name = name.into();
        self.author_email = email.into();
        self
    }

    /// Append a commit built from a full message.
    ///
    /// The first line becomes the subject and everything after the following
    /// blank lines becomes the body.
    pub fn commit(&mut self, message: &str, date: DateTime<Utc>) -> &mut Self {
        let (subject, body) = split_message(message);
        let hash = format!("{:040x}", self.records.len() + 1);
        let author = Signature::new(self.author_name.clone(), self.author_email.clone(), date);

        self.push(LogRecord::new(hash, subject, author).with_body(body))
    }

    /// Append a prepared record
    pub fn push(&mut self, record: LogRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Tag the latest commit, moving the tag if the name already exists
    pub fn tag(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        let Some(index) = self.records.len().checked_sub(1) else {
            warn!(tag = %name, "cannot tag an empty history");
            return self;
        };

        self.tags.retain(|(existing, _)| existing != &name);
        self.tags.push((name, index));
        self
    }

    /// Number of commits
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history has no commits
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn resolve(&self, revision: &str) -> Result<usize> {
        if revision == "HEAD" {
            return self
                .records
                .len()
                .checked_sub(1)
                .ok_or_else(|| GitError::UnknownRevision(revision.to_string()));
        }

        if let Some((_, index)) = self.tags.iter().find(|(name, _)| name == revision) {
            return Ok(*index);
        }

        if revision.len() >= 4 {
            if let Some(index) = self.records.iter().position(|r| r.hash.starts_with(revision)) {
                return Ok(index);
            }
        }

        Err(GitError::UnknownRevision(revision.to_string()))
    }
}

impl LogSource for MemoryLog {
    fn log(&self, range: &RevisionRange) -> Result<String> {
        if self.records.is_empty() {
            return Ok(String::new());
        }

        let end = self.resolve(&range.to)? + 1;
        let start = match &range.from {
            Some(from) => self.resolve(from)? + 1,
            None => 0,
        };

        if start >= end {
            return Ok(String::new());
        }

        Ok(self.records[start..end]
            .iter()
            .rev()
            .map(LogRecord::to_block)
            .collect())
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self
            .tags
            .iter()
            .map(|(name, index)| TagInfo::new(name.clone(), self.records[*index].committer.date))
            .collect())
    }
}

fn split_message(message: &str) -> (&str, &str) {
    match message.split_once('\n') {
        Some((subject, rest)) => (subject.trim_end(), rest.trim_start_matches(['\n', '\r']).trim_end()),
        None => (message.trim_end(), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RECORD_SEPARATOR;
    use chrono::{Duration, TimeZone};

    fn history() -> MemoryLog {
        let base = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let mut log = MemoryLog::new();
        log.commit("feat: one", base)
            .tag("1.0.0")
            .commit("fix: two\n\nbody line", base + Duration::days(1))
            .commit("feat: three", base + Duration::days(2))
            .tag("1.1.0")
            .commit("chore: four", base + Duration::days(3));
        log
    }

    fn subjects(text: &str) -> Vec<String> {
        text.split(RECORD_SEPARATOR)
            .filter(|b| !b.is_empty())
            .map(|b| b.split(crate::types::FIELD_SEPARATOR).nth(8).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_log_until_head() {
        let log = history();
        let text = log.log(&RevisionRange::until("HEAD")).unwrap();
        assert_eq!(
            subjects(&text),
            vec!["chore: four", "feat: three", "fix: two", "feat: one"]
        );
    }

    #[test]
    fn test_log_between_tags() {
        let log = history();
        let text = log.log(&RevisionRange::between("1.0.0", "1.1.0")).unwrap();
        assert_eq!(subjects(&text), vec!["feat: three", "fix: two"]);
    }

    #[test]
    fn test_message_split() {
        let log = history();
        let text = log.log(&RevisionRange::between("1.0.0", "1.0.0")).unwrap();
        assert!(text.is_empty());

        assert_eq!(split_message("fix: two\n\nbody line\n"), ("fix: two", "body line"));
        assert_eq!(split_message("subject only"), ("subject only", ""));
    }

    #[test]
    fn test_tags_carry_commit_dates() {
        let log = history();
        let tags = log.tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].name, "1.1.0");
        assert_eq!(tags[1].date, Utc.with_ymd_and_hms(2018, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unknown_revision() {
        let log = history();
        let err = log.log(&RevisionRange::until("2.0.0")).unwrap_err();
        assert!(matches!(err, GitError::UnknownRevision(ref r) if r == "2.0.0"));
    }

    #[test]
    fn test_empty_history() {
        let log = MemoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.log(&RevisionRange::until("HEAD")).unwrap(), "");
        assert!(log.tags().unwrap().is_empty());
    }
}
