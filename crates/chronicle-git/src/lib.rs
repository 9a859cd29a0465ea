//! chronicle Git - the log source behind changelog assembly
//!
//! This crate reads commit history and tags, either from a git repository
//! through `git2` or from an in-memory history, and hands them out as raw
//! delimited log text.

mod log;
mod memory;
mod repository;
mod tags;
pub mod types;

pub use log::LogSource;
pub use memory::MemoryLog;
pub use repository::{GitRepo, Result};
pub use types::{LogRecord, RevisionRange, Signature, TagInfo, FIELD_COUNT, FIELD_SEPARATOR, RECORD_SEPARATOR};
