//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, PatternConfig};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_pattern("options.header", &config.options.header)?;
    validate_pattern("options.merges", &config.options.merges)?;
    validate_pattern("options.reverts", &config.options.reverts)?;
    validate_grouping(config)?;
    validate_issues(config)?;
    validate_notes(config)?;
    validate_tags(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_pattern(field: &str, rule: &PatternConfig) -> Result<()> {
    if !rule.is_enabled() {
        return Ok(());
    }

    Regex::new(&rule.pattern)
        .map_err(|e| invalid(format!("{}.pattern", field), e.to_string()))?;

    if rule.pattern_maps.is_empty() {
        return Err(invalid(
            format!("{}.pattern_maps", field),
            "at least one field name is required when a pattern is set",
        )
        .into());
    }

    if let Some(i) = rule.pattern_maps.iter().position(|m| m.trim().is_empty()) {
        return Err(invalid(
            format!("{}.pattern_maps[{}]", field, i),
            "field name cannot be empty",
        )
        .into());
    }

    Ok(())
}

fn validate_grouping(config: &Config) -> Result<()> {
    if config.options.commit_groups.group_by.is_empty() {
        return Err(invalid("options.commit_groups.group_by", "cannot be empty").into());
    }

    let valid_group_sorts = ["Title", "RawTitle"];
    let sort_by = config.options.commit_groups.sort_by.as_str();
    if !sort_by.is_empty() && !valid_group_sorts.contains(&sort_by) {
        return Err(invalid(
            "options.commit_groups.sort_by",
            format!("must be one of: {}", valid_group_sorts.join(", ")),
        )
        .into());
    }

    Ok(())
}

fn validate_issues(config: &Config) -> Result<()> {
    for (i, prefix) in config.options.issues.prefix.iter().enumerate() {
        if prefix.is_empty() {
            return Err(invalid(
                format!("options.issues.prefix[{}]", i),
                "prefix cannot be empty",
            )
            .into());
        }
    }
    Ok(())
}

fn validate_notes(config: &Config) -> Result<()> {
    for (i, keyword) in config.options.notes.keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            return Err(invalid(
                format!("options.notes.keywords[{}]", i),
                "keyword cannot be empty",
            )
            .into());
        }
    }
    Ok(())
}

fn validate_tags(config: &Config) -> Result<()> {
    if let Some(filter) = &config.tags.filter {
        Regex::new(filter).map_err(|e| invalid("tags.filter", e.to_string()))?;
    }
    Ok(())
}
