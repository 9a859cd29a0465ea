//! chronicle Core - configuration and error types shared by the chronicle crates

pub mod config;
pub mod error;

pub use error::{ChangelogError, ChronicleError, ConfigError, GitError, Result};
