//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{ConfigError, Result};

use super::defaults::{config_file_names, CONFIG_DIR};
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
#[instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`                (e.g. `.chronicle.yml`)
///   2. `<dir>/.chronicle/config.yml`
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        let nested = current.join(CONFIG_DIR).join("config.yml");
        if nested.is_file() {
            info!(path = %nested.display(), "found config file in .chronicle/");
            return Some(nested);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults.
///
/// A missing file falls back to defaults; a file that exists but fails to
/// parse or validate is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}
