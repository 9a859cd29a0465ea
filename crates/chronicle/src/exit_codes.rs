//! Exit codes for the CLI

use chronicle_core::{ChangelogError, ChronicleError, ConfigError, GitError};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error, including patterns that do not compile
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// The requested tag does not exist
pub const REVISION_NOT_FOUND: i32 = 4;

/// The requested range has no commits
pub const NO_COMMITS: i32 = 5;

/// Map an error to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<ChangelogError>() {
        return for_changelog(e);
    }
    if let Some(e) = err.downcast_ref::<ChronicleError>() {
        return match e {
            ChronicleError::Config(_) => CONFIG_ERROR,
            ChronicleError::Git(_) => GIT_ERROR,
            ChronicleError::Changelog(c) => for_changelog(c),
            ChronicleError::Io(_) => ERROR,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    ERROR
}

fn for_changelog(err: &ChangelogError) -> i32 {
    match err {
        ChangelogError::RevisionNotFound(_) => REVISION_NOT_FOUND,
        ChangelogError::NoCommitsFound => NO_COMMITS,
        ChangelogError::PatternCompile { .. } => CONFIG_ERROR,
        ChangelogError::Git(_) => GIT_ERROR,
        _ => ERROR,
    }
}
