//! Pattern and note rules

use chronicle_core::config::PatternConfig;
use regex::Regex;
use tracing::{debug, warn};

use crate::types::{Fields, Note};
use crate::Result;
use chronicle_core::ChangelogError;

/// A regular expression whose capture groups map positionally to field names
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    names: Vec<String>,
}

impl PatternRule {
    /// Compile a rule.
    ///
    /// Returns `Ok(None)` for an empty pattern. `rule` names the rule in
    /// compile errors.
    pub fn compile(rule: &str, config: &PatternConfig) -> Result<Option<Self>> {
        if !config.is_enabled() {
            debug!(rule, "pattern rule disabled");
            return Ok(None);
        }

        let regex = Regex::new(&config.pattern)
            .map_err(|e| ChangelogError::pattern(rule, &config.pattern, e))?;

        let groups = regex.captures_len() - 1;
        if config.pattern_maps.len() > groups {
            warn!(
                rule,
                groups,
                names = config.pattern_maps.len(),
                "more field names than capture groups, extra fields will be empty"
            );
        }

        Ok(Some(Self {
            regex,
            names: config.pattern_maps.clone(),
        }))
    }

    /// Apply the rule to `text`.
    ///
    /// On a match every declared name is present; groups that did not
    /// participate map to an empty string.
    pub fn apply(&self, text: &str) -> Option<Fields> {
        let caps = self.regex.captures(text)?;

        Some(
            self.names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = caps.get(i + 1).map_or("", |m| m.as_str());
                    (name.as_str(), value)
                })
                .collect(),
        )
    }

    /// Declared field names
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Keyword-driven detection of note blocks in a commit body
#[derive(Debug, Clone)]
pub struct NoteRule {
    regex: Option<Regex>,
}

impl NoteRule {
    /// Build from a keyword list; an empty list never yields notes
    pub fn compile(keywords: &[String]) -> Result<Self> {
        if keywords.is_empty() {
            return Ok(Self { regex: None });
        }

        // Longest first so a keyword that prefixes another cannot shadow it
        let mut sorted: Vec<&String> = keywords.iter().collect();
        sorted.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alternation = sorted
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(r"^[\s*]*({})(?:\s*:|\s|$)\s*(.*)$", alternation);
        let regex =
            Regex::new(&pattern).map_err(|e| ChangelogError::pattern("notes", &pattern, e))?;

        Ok(Self { regex: Some(regex) })
    }

    /// Extract every note from `body`.
    ///
    /// A note starts on a line beginning with a keyword. Its body is the rest
    /// of that line plus the following lines up to a blank line, the next
    /// keyword line or the end of the text.
    pub fn extract(&self, body: &str) -> Vec<Note> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let mut notes = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in body.lines() {
            if let Some(caps) = regex.captures(line) {
                flush(&mut current, &mut notes);
                let title = caps.get(1).map_or("", |m| m.as_str());
                let rest = caps.get(2).map_or("", |m| m.as_str().trim());
                let lines = if rest.is_empty() { Vec::new() } else { vec![rest] };
                current = Some((title.to_string(), lines));
            } else if line.trim().is_empty() {
                flush(&mut current, &mut notes);
            } else if let Some((_, lines)) = current.as_mut() {
                lines.push(line.trim_end());
            }
        }
        flush(&mut current, &mut notes);

        notes
    }
}

fn flush(current: &mut Option<(String, Vec<&str>)>, notes: &mut Vec<Note>) {
    if let Some((title, lines)) = current.take() {
        notes.push(Note {
            title,
            body: lines.join("\n").trim().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, maps: &[&str]) -> PatternRule {
        PatternRule::compile("test", &PatternConfig::new(pattern, maps))
            .unwrap()
            .unwrap()
    }

    fn notes(body: &str) -> Vec<Note> {
        NoteRule::compile(&["BREAKING CHANGE".to_string()])
            .unwrap()
            .extract(body)
    }

    #[test]
    fn test_header_fields_positional() {
        let header = rule(
            PatternConfig::default_header().pattern.as_str(),
            &["Type", "Scope", "Subject"],
        );
        let fields = header.apply("feat(core): Add foo bar").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("Type"), Some("feat"));
        assert_eq!(fields.get("Scope"), Some("core"));
        assert_eq!(fields.get("Subject"), Some("Add foo bar"));
    }

    #[test]
    fn test_unmatched_optional_group_is_empty() {
        let header = rule(
            PatternConfig::default_header().pattern.as_str(),
            &["Type", "Scope", "Subject"],
        );
        let fields = header.apply("fix: typo").unwrap();
        assert_eq!(fields.get("Scope"), Some(""));
        assert_eq!(fields.get("Subject"), Some("typo"));
    }

    #[test]
    fn test_extra_names_are_empty() {
        let r = rule(r"^(\w+):", &["Type", "Extra"]);
        let fields = r.apply("feat: x").unwrap();
        assert_eq!(fields.get("Type"), Some("feat"));
        assert_eq!(fields.get("Extra"), Some(""));
    }

    #[test]
    fn test_no_match_yields_none() {
        let r = rule(r"^(\w+):\s", &["Type"]);
        assert!(r.apply("Merge branch 'main'").is_none());
    }

    #[test]
    fn test_disabled_and_invalid_rules() {
        assert!(PatternRule::compile("merges", &PatternConfig::default())
            .unwrap()
            .is_none());

        let err = PatternRule::compile("header", &PatternConfig::new("(", &["A"])).unwrap_err();
        assert!(matches!(err, ChangelogError::PatternCompile { ref rule, .. } if rule == "header"));
    }

    #[test]
    fn test_note_on_following_lines() {
        let found = notes("BREAKING CHANGE:\nMultiple\nbreaking\nchange message.");
        assert_eq!(
            found,
            vec![Note {
                title: "BREAKING CHANGE".to_string(),
                body: "Multiple\nbreaking\nchange message.".to_string(),
            }]
        );
    }

    #[test]
    fn test_note_on_same_line_stops_at_blank() {
        let found = notes("Intro text.\n\nBREAKING CHANGE: Online message.\nsecond line\n\nTrailing paragraph.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, "Online message.\nsecond line");
    }

    #[test]
    fn test_repeated_keyword_yields_separate_notes() {
        let found = notes("BREAKING CHANGE: first\nBREAKING CHANGE: second");
        let bodies: Vec<&str> = found.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[test]
    fn test_keyword_must_open_the_line() {
        assert!(notes("This is not a BREAKING CHANGE: really").is_empty());
        assert!(notes("BREAKING CHANGES: plural").is_empty());
    }

    #[test]
    fn test_no_keywords_no_notes() {
        let rule = NoteRule::compile(&[]).unwrap();
        assert!(rule.extract("BREAKING CHANGE: x").is_empty());
    }

    #[test]
    fn test_longest_keyword_wins() {
        let rule = NoteRule::compile(&["NOTE".to_string(), "NOTE WELL".to_string()]).unwrap();
        let found = rule.extract("NOTE WELL: careful");
        assert_eq!(found[0].title, "NOTE WELL");
        assert_eq!(found[0].body, "careful");
    }
}
