//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use chronicle_core::config::defaults::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use chronicle_core::config::Config;

use crate::cli::output::{path_style, success};
use crate::cli::Cli;

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; fail if the file exists
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let cwd = std::env::current_dir()?;
        let default_name = if self.toml {
            DEFAULT_CONFIG_TOML
        } else {
            DEFAULT_CONFIG_YAML
        };
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(default_name));

        if config_path.exists() && !self.force {
            if self.yes || !console::Term::stdout().is_term() {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, render(self.toml)?)?;

        if !cli.quiet {
            success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Set info.repository_url and adjust the commit patterns");
            println!("  2. Run {} to check it", style("chronicle validate").cyan());
            println!("  3. Run {} to write the changelog", style("chronicle generate --write").cyan());
        }

        Ok(())
    }
}

/// Default configuration file contents
fn render(toml: bool) -> anyhow::Result<String> {
    if toml {
        Ok(toml::to_string_pretty(&Config::default())?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}
