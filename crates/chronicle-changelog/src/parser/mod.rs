//! Commit parsing
//!
//! Turns raw log text into [`Commit`] records using the configured header,
//! merge and revert rules, the note keywords and the issue prefixes. The
//! three pattern rules are applied independently, so one subject may match
//! any combination of them.

mod block;
mod references;
mod rules;

pub use block::{decode_block, split_blocks};
pub use references::ReferenceScanner;
pub use rules::{NoteRule, PatternRule};

use chronicle_core::config::OptionsConfig;
use chronicle_git::LogRecord;
use tracing::{debug, instrument, warn};

use crate::types::{Commit, Merge, Revert};
use crate::Result;

/// Parser built from configured rules
#[derive(Debug, Clone)]
pub struct CommitParser {
    header: Option<PatternRule>,
    merge: Option<PatternRule>,
    revert: Option<PatternRule>,
    notes: NoteRule,
    references: ReferenceScanner,
}

impl CommitParser {
    /// Compile every rule; fails on the first pattern that does not compile
    pub fn new(options: &OptionsConfig) -> Result<Self> {
        Ok(Self {
            header: PatternRule::compile("header", &options.header)?,
            merge: PatternRule::compile("merges", &options.merges)?,
            revert: PatternRule::compile("reverts", &options.reverts)?,
            notes: NoteRule::compile(&options.notes.keywords)?,
            references: ReferenceScanner::new(&options.issues.prefix)?,
        })
    }

    /// Parse every block of `text`, keeping log order
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn parse_log(&self, text: &str) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for block in split_blocks(text) {
            if let Some(commit) = self.parse_block(block)? {
                commits.push(commit);
            }
        }
        debug!(count = commits.len(), "parsed commits");
        Ok(commits)
    }

    /// Parse one block; `None` when its subject is blank
    pub fn parse_block(&self, block: &str) -> Result<Option<Commit>> {
        let record = decode_block(block)?;
        Ok(self.parse_record(record))
    }

    /// Parse a decoded record; `None` when its subject is blank
    pub fn parse_record(&self, record: LogRecord) -> Option<Commit> {
        let header = record.subject.trim();
        if header.is_empty() {
            warn!(hash = %record.short_hash, "skipping commit with empty subject");
            return None;
        }
        let header = header.to_string();

        let message = if record.body.is_empty() {
            header.clone()
        } else {
            format!("{}\n\n{}", header, record.body)
        };

        let fields = self.header.as_ref().and_then(|rule| rule.apply(&header));
        let merge = self
            .merge
            .as_ref()
            .and_then(|rule| rule.apply(&header))
            .map(|fields| Merge { fields });
        let revert = self
            .revert
            .as_ref()
            .and_then(|rule| rule.apply(&header))
            .map(|fields| Revert { fields });

        Some(Commit {
            mentions: self.references.mentions(&message),
            issues: self.references.issues(&message),
            notes: self.notes.extract(&record.body),
            hash: record.hash,
            short_hash: record.short_hash,
            author: record.author,
            committer: record.committer,
            header,
            body: record.body,
            fields,
            merge,
            revert,
        })
    }
}
