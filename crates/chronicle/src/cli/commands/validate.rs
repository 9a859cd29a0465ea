//! Validate command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use chronicle_changelog::ChangelogGenerator;
use chronicle_core::config::{find_config, load_config, Config};
use chronicle_git::GitRepo;

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate the configuration and check the repository
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Configuration file (default: searched upward from the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only validate the configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let config_path = self.config.clone().or_else(|| find_config(&cwd));
        let config = match &config_path {
            Some(path) => match load_config(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    errors.push(format!("Configuration: {}", e));
                    None
                }
            },
            None => {
                warnings.push("No configuration file found, using defaults".to_string());
                Some(Config::default())
            }
        };

        // Patterns the loader accepted must also build into a generator
        if let Some(ref cfg) = config {
            if let Err(e) = ChangelogGenerator::new(cfg.clone()) {
                errors.push(format!("Configuration: {}", e));
            }
        }

        if !self.config_only {
            match GitRepo::discover(&cwd) {
                Ok(repo) => {
                    if repo.is_unborn() {
                        warnings.push("Repository has no commits".to_string());
                    }
                    match repo.tags() {
                        Ok(tags) if tags.is_empty() => {
                            warnings.push("No tags found, every commit is unreleased".to_string());
                        }
                        Ok(_) => {}
                        Err(e) => errors.push(format!("Tag listing: {}", e)),
                    }
                }
                Err(e) => errors.push(format!("Git repository: {}", e)),
            }
        }

        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        if !passed {
            std::process::exit(exit_codes::CONFIG_ERROR);
        }

        Ok(())
    }
}
