//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ChangelogTree;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render an assembled changelog
    fn format(&self, tree: &ChangelogTree) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
