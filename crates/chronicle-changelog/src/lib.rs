//! chronicle Changelog - commit parsing and changelog assembly
//!
//! Raw log text from a [`chronicle_git::LogSource`] is parsed into commits
//! with configured pattern rules, filtered, grouped and sorted, and
//! assembled into one version per tag. The resulting [`ChangelogTree`] is
//! handed to a [`ChangelogFormatter`] for rendering.

pub mod filter;
pub mod formatter;
pub mod generator;
pub mod grouping;
pub mod parser;
pub mod query;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::{ChangelogGenerator, GenerateOptions};
pub use parser::CommitParser;
pub use query::TagQuery;
pub use types::{
    ChangelogTree, Commit, CommitGroup, Fields, Merge, Note, NoteGroup, RelatedTag,
    RepositoryInfo, Revert, Tag, Version,
};

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, chronicle_core::ChangelogError>;
