//! Git types and the log wire format

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Introduces every commit block in log text
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Separates the fields of one commit block
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Number of fields in a commit block
pub const FIELD_COUNT: usize = 10;

/// A name, email and timestamp attached to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Timestamp
    pub date: DateTime<Utc>,
}

impl Signature {
    /// Create a new signature
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date,
        }
    }
}

/// One commit as it travels through the log text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Author signature
    pub author: Signature,
    /// Committer signature
    pub committer: Signature,
    /// First line of the message
    pub subject: String,
    /// Message after the subject, may be empty
    pub body: String,
}

impl LogRecord {
    /// Create a record authored and committed by the same person
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        author: Signature,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            committer: author.clone(),
            author,
            subject: subject.into(),
            body: String::new(),
        }
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a committer different from the author
    pub fn with_committer(mut self, committer: Signature) -> Self {
        self.committer = committer;
        self
    }

    /// Render the record as one delimited block.
    ///
    /// Field order: hash, short hash, author name, author email, author
    /// date, committer name, committer email, committer date, subject, body.
    /// Dates are RFC 3339.
    pub fn to_block(&self) -> String {
        let author_date = self.author.date.to_rfc3339();
        let committer_date = self.committer.date.to_rfc3339();
        let fields = [
            self.hash.as_str(),
            self.short_hash.as_str(),
            self.author.name.as_str(),
            self.author.email.as_str(),
            author_date.as_str(),
            self.committer.name.as_str(),
            self.committer.email.as_str(),
            committer_date.as_str(),
            self.subject.as_str(),
            self.body.as_str(),
        ];

        let mut block = String::new();
        block.push(RECORD_SEPARATOR);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                block.push(FIELD_SEPARATOR);
            }
            block.push_str(field);
        }
        block
    }
}

/// A tag and the date used to order it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Date of the commit the tag points to
    pub date: DateTime<Utc>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// A span of history: everything reachable from `to` but not from `from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    /// Exclusive lower bound; `None` reaches the root of history
    pub from: Option<String>,
    /// Inclusive upper bound
    pub to: String,
}

impl RevisionRange {
    /// Everything reachable from `to`
    pub fn until(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
        }
    }

    /// Everything after `from` up to and including `to`
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
        }
    }
}

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "{}..{}", from, self.to),
            None => write!(f, "{}", self.to),
        }
    }
}
