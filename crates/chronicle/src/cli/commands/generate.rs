//! Generate command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use chronicle_changelog::{ChangelogGenerator, GenerateOptions, MarkdownFormatter, TagQuery};
use chronicle_core::config::{load_config, load_config_or_default, Config};
use chronicle_git::GitRepo;

use crate::cli::output::{path_style, success};
use crate::cli::{Cli, OutputFormat};

/// Generate a changelog from the repository history
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Tags to include: `TAG`, `..TAG`, `TAG..` or `OLD..NEW` (default: all)
    pub query: Option<String>,

    /// Configuration file (default: searched upward from the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, conflicts_with = "write")]
    pub output: Option<PathBuf>,

    /// Write to the configured changelog file
    #[arg(short, long)]
    pub write: bool,

    /// Name the unreleased commits as this upcoming tag
    #[arg(long, value_name = "TAG")]
    pub next_tag: Option<String>,

    /// Print the changelog title as a heading
    #[arg(long)]
    pub title: bool,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(query = ?self.query, next_tag = ?self.next_tag, "executing generate command");
        let cwd = std::env::current_dir()?;
        let config = self.load_config(&cwd)?;

        let repo = GitRepo::discover(&cwd)?;
        let generator = ChangelogGenerator::new(config.clone())?
            .with_formatter(
                MarkdownFormatter::from_config(&config.output).with_title(self.title),
            );

        let options = GenerateOptions {
            query: TagQuery::parse(self.query.as_deref().unwrap_or_default()),
            next_tag: self.next_tag.clone(),
        };
        let tree = generator.generate(&repo, &options)?;

        let content = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&tree)?,
            OutputFormat::Text => generator.format(&tree),
        };

        let target = match (&self.output, self.write) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(repo.path().join(&config.output.file)),
            (None, false) => None,
        };

        match target {
            Some(path) => {
                std::fs::write(&path, &content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                if !cli.quiet {
                    success(&format!(
                        "Changelog with {} version(s) written to {}",
                        tree.versions.len(),
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => print!("{}", content),
        }

        Ok(())
    }

    fn load_config(&self, cwd: &std::path::Path) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Ok(load_config(path)?),
            None => {
                let (config, path) = load_config_or_default(cwd)?;
                info!(path = ?path, "configuration resolved");
                Ok(config)
            }
        }
    }
}
