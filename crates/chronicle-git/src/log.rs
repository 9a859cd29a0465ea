//! Commit log extraction

use chrono::{DateTime, TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument, warn};

use crate::repository::{GitRepo, Result};
use crate::types::{LogRecord, RevisionRange, Signature, TagInfo};

/// Something that can produce commit log text and a tag list.
///
/// `log` returns the concatenated blocks for a range, newest first. An empty
/// history yields an empty string rather than an error.
pub trait LogSource {
    /// Log text for every commit in `range`
    fn log(&self, range: &RevisionRange) -> Result<String>;

    /// Every tag with the date of the commit it points to
    fn tags(&self) -> Result<Vec<TagInfo>>;
}

impl GitRepo {
    /// Walk the commits of a range, newest first
    #[instrument(skip(self), fields(range = %range))]
    pub fn records(&self, range: &RevisionRange) -> Result<Vec<LogRecord>> {
        if self.is_unborn() {
            debug!("repository has no commits");
            return Ok(Vec::new());
        }

        let to = self.resolve(&range.to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to)?;
        if let Some(from) = &range.from {
            revwalk.hide(self.resolve(from)?)?;
        }

        let mut records = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            records.push(commit_to_record(&commit));
        }

        debug!(count = records.len(), "walked commits");
        Ok(records)
    }
}

impl LogSource for GitRepo {
    fn log(&self, range: &RevisionRange) -> Result<String> {
        let records = self.records(range)?;
        Ok(records.iter().map(LogRecord::to_block).collect())
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        GitRepo::tags(self)
    }
}

/// Convert git seconds to a date; out-of-range values become the epoch
pub(crate) fn git_date(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_else(|| {
        warn!(seconds, "git timestamp out of range, using the epoch");
        DateTime::UNIX_EPOCH
    })
}

fn signature(sig: &git2::Signature<'_>) -> Signature {
    Signature::new(
        sig.name().unwrap_or_default(),
        sig.email().unwrap_or_default(),
        git_date(sig.when().seconds()),
    )
}

fn commit_to_record(commit: &git2::Commit<'_>) -> LogRecord {
    let subject = commit.summary().unwrap_or_default();
    let body = commit.body().unwrap_or_default().trim_end();

    LogRecord::new(commit.id().to_string(), subject, signature(&commit.author()))
        .with_committer(signature(&commit.committer()))
        .with_body(body)
}
