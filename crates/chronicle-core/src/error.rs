//! Error types for chronicle

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ChronicleError
pub type Result<T> = std::result::Result<T, ChronicleError>;

/// Main error type for chronicle operations
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A revision expression could not be resolved
    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The requested starting tag or revision is not in the tag list
    #[error("\"{0}\" was not found")]
    RevisionNotFound(String),

    /// The resolved range produced no commit blocks
    #[error("No commits found")]
    NoCommitsFound,

    /// A configured regular expression failed to compile
    #[error("Invalid {rule} pattern '{pattern}': {source}")]
    PatternCompile {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A commit block did not carry the expected fields
    #[error("Malformed commit block: {0}")]
    MalformedBlock(String),

    /// Log source failure
    #[error(transparent)]
    Git(#[from] GitError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChangelogError {
    /// Build a pattern compile error for the named rule
    pub fn pattern(rule: impl Into<String>, pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::PatternCompile {
            rule: rule.into(),
            pattern: pattern.into(),
            source,
        }
    }
}
