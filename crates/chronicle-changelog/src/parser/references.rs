//! Mention and issue reference scanning

use std::sync::LazyLock;

use regex::Regex;

use crate::Result;
use chronicle_core::ChangelogError;

/// `@name` preceded by start of text or a non-word character, so that email
/// addresses are not read as mentions
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w])@([\w-]+)").expect("Invalid regex"));

/// Finds mentions and issue numbers in commit messages
#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    issue_regex: Option<Regex>,
}

impl ReferenceScanner {
    /// Build a scanner for the given issue prefixes
    pub fn new(prefixes: &[String]) -> Result<Self> {
        let mut prefixes: Vec<&String> = prefixes.iter().filter(|p| !p.is_empty()).collect();
        if prefixes.is_empty() {
            return Ok(Self { issue_regex: None });
        }
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));

        let alternation = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?:{})(\d+)", alternation);
        let regex =
            Regex::new(&pattern).map_err(|e| ChangelogError::pattern("issues", &pattern, e))?;

        Ok(Self {
            issue_regex: Some(regex),
        })
    }

    /// Mentioned names, without the `@`, deduplicated in first occurrence order
    pub fn mentions(&self, text: &str) -> Vec<String> {
        unique(MENTION_REGEX.captures_iter(text).filter_map(|c| c.get(1)).map(|m| m.as_str()))
    }

    /// Issue numbers, deduplicated in first occurrence order
    pub fn issues(&self, text: &str) -> Vec<String> {
        match &self.issue_regex {
            Some(regex) => unique(regex.captures_iter(text).filter_map(|c| c.get(1)).map(|m| m.as_str())),
            None => Vec::new(),
        }
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new(&["#".to_string(), "gh-".to_string()]).unwrap()
    }

    #[test]
    fn test_mentions_in_order_without_duplicates() {
        let s = scanner();
        assert_eq!(
            s.mentions("@bob thanks @alice and @bob"),
            vec!["bob", "alice"]
        );
    }

    #[test]
    fn test_email_is_not_a_mention() {
        let s = scanner();
        assert!(s.mentions("Signed-off-by: Ann <ann@example.com>").is_empty());
    }

    #[test]
    fn test_issues_with_each_prefix() {
        let s = scanner();
        assert_eq!(
            s.issues("Fixes #12, gh-7 and again #12"),
            vec!["12", "7"]
        );
    }

    #[test]
    fn test_prefix_must_be_followed_by_digits() {
        let s = scanner();
        assert!(s.issues("see # and gh-x").is_empty());
    }

    #[test]
    fn test_no_prefixes() {
        let s = ReferenceScanner::new(&[]).unwrap();
        assert!(s.issues("#12").is_empty());
    }
}
