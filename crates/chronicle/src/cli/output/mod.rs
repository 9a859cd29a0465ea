//! Output formatting utilities

use console::{style, Style};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}
