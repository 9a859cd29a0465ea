//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = ".chronicle.yml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = ".chronicle.toml";

/// Directory that may hold `config.yml` instead of a root-level file
pub const CONFIG_DIR: &str = ".chronicle";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        ".chronicle.yaml",
        "chronicle.yml",
        "chronicle.toml",
        DEFAULT_CONFIG_TOML,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# chronicle configuration

info:
  title: CHANGELOG
  repository_url: ""

options:
  commits:
    filters:
      Type:
        - feat
        - fix
    sort_by: Scope

  commit_groups:
    group_by: Type
    sort_by: Title
    title_maps:
      feat: Features
      fix: Bug Fixes

  header:
    pattern: "^(\\w*)(?:\\(([\\w\\$\\.\\-\\*\\s]*)\\))?\\:\\s(.*)$"
    pattern_maps:
      - Type
      - Scope
      - Subject

  issues:
    prefix:
      - "#"
      - "gh-"

  merges:
    pattern: "^Merge pull request #(\\d+) from (.*)$"
    pattern_maps:
      - Ref
      - Source

  reverts:
    pattern: "^Revert \"([\\s\\S]*)\"$"
    pattern_maps:
      - Header

  notes:
    keywords:
      - BREAKING CHANGE

tags:
  filter: null

output:
  file: CHANGELOG.md
  unreleased_title: Unreleased
  # header fields used for each markdown entry
  scope_field: Scope
  subject_field: Subject
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
