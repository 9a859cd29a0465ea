//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{CompletionsCommand, GenerateCommand, InitCommand, ValidateCommand};

/// chronicle - changelog generator driven by configurable commit patterns
#[derive(Debug, Parser)]
#[command(name = "chronicle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a changelog from the repository history
    Generate(GenerateCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Validate the configuration
    Validate(ValidateCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Generate(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_query() {
        let cli = Cli::parse_from(["chronicle", "generate", "1.0.0..", "--next-tag", "2.0.0"]);
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.query.as_deref(), Some("1.0.0.."));
                assert_eq!(cmd.next_tag.as_deref(), Some("2.0.0"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chronicle", "validate", "--format", "json", "-q"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
    }
}
