//! Changelog assembly

use std::ops::Range;

use chronicle_core::config::Config;
use chronicle_core::ChangelogError;
use chronicle_git::{LogSource, RevisionRange};
use regex::Regex;
use tracing::{debug, info, instrument};

use crate::filter::filter_commits;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::grouping::{group_commits, merge_commits, note_groups, revert_commits};
use crate::parser::{split_blocks, CommitParser};
use crate::query::TagQuery;
use crate::types::{ChangelogTree, Commit, RelatedTag, RepositoryInfo, Tag, Version};
use crate::Result;

/// Per-run options
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Which tags become versions
    pub query: TagQuery,
    /// Name for the unreleased head instead of the configured title
    pub next_tag: Option<String>,
}

impl GenerateOptions {
    /// Options for a parsed query string
    pub fn query(query: &str) -> Self {
        Self {
            query: TagQuery::parse(query),
            next_tag: None,
        }
    }

    /// Name the unreleased head
    pub fn with_next_tag(mut self, name: impl Into<String>) -> Self {
        self.next_tag = Some(name.into());
        self
    }
}

/// Changelog generator
pub struct ChangelogGenerator {
    parser: CommitParser,
    tag_filter: Option<Regex>,
    formatter: Box<dyn ChangelogFormatter>,
    config: Config,
}

impl ChangelogGenerator {
    /// Create a generator; every configured pattern is compiled here
    pub fn new(config: Config) -> Result<Self> {
        let parser = CommitParser::new(&config.options)?;
        let tag_filter = config
            .tags
            .filter
            .as_deref()
            .map(|f| Regex::new(f).map_err(|e| ChangelogError::pattern("tags.filter", f, e)))
            .transpose()?;

        Ok(Self {
            parser,
            tag_filter,
            formatter: Box::new(MarkdownFormatter::from_config(&config.output)),
            config,
        })
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Assemble the changelog tree.
    ///
    /// Versions come out newest first with the unreleased head leading when
    /// the query includes it and it has commits. Nothing is returned unless
    /// every range was read and parsed.
    #[instrument(skip(self, source), fields(query = %options.query))]
    pub fn generate<S: LogSource + ?Sized>(
        &self,
        source: &S,
        options: &GenerateOptions,
    ) -> Result<ChangelogTree> {
        info!("assembling changelog");
        let tags = self.tags(source)?;
        let selected = select(&tags, &options.query)?;
        debug!(tags = tags.len(), selected = selected.len(), "resolved tag query");

        let mut versions = Vec::new();
        let mut blocks = 0usize;
        let mut head: Option<RelatedTag> = None;

        if options.query.includes_unreleased() {
            let range = match tags.first() {
                Some(newest) => RevisionRange::between(&newest.name, "HEAD"),
                None => RevisionRange::until("HEAD"),
            };
            let (commits, count) = self.read(source, &range)?;
            blocks += count;

            if let Some(latest) = commits.first() {
                let name = options
                    .next_tag
                    .clone()
                    .unwrap_or_else(|| self.config.output.unreleased_title.clone());
                let mut tag = Tag::new(name, latest.committer.date);
                tag.previous = tags.first().map(Tag::related);
                if options.next_tag.is_some() {
                    head = Some(tag.related());
                }
                versions.push(self.version(tag, true, commits));
            }
        }

        for i in selected {
            let mut tag = tags[i].clone();
            if i == 0 && head.is_some() {
                tag.next = head.clone();
            }

            let range = match tags.get(i + 1) {
                Some(older) => RevisionRange::between(&older.name, &tag.name),
                None => RevisionRange::until(&tag.name),
            };
            let (commits, count) = self.read(source, &range)?;
            blocks += count;
            versions.push(self.version(tag, false, commits));
        }

        if blocks == 0 {
            return Err(ChangelogError::NoCommitsFound);
        }

        info!(versions = versions.len(), commits = blocks, "changelog assembled");
        Ok(ChangelogTree {
            info: RepositoryInfo {
                title: self.config.info.title.clone(),
                repository_url: self.config.info.repository_url.clone(),
            },
            versions,
        })
    }

    /// Format a tree with the configured formatter
    pub fn format(&self, tree: &ChangelogTree) -> String {
        self.formatter.format(tree)
    }

    /// Generate and format in one step
    pub fn generate_formatted<S: LogSource + ?Sized>(
        &self,
        source: &S,
        options: &GenerateOptions,
    ) -> Result<String> {
        let tree = self.generate(source, options)?;
        let output = self.format(&tree);
        debug!(output_len = output.len(), "changelog formatted");
        Ok(output)
    }

    /// Filtered tags, newest first, linked to their neighbours
    fn tags<S: LogSource + ?Sized>(&self, source: &S) -> Result<Vec<Tag>> {
        let mut found = source.tags()?;
        if let Some(filter) = &self.tag_filter {
            found.retain(|t| filter.is_match(&t.name));
        }
        found.sort_by(|a, b| b.date.cmp(&a.date));

        let mut tags: Vec<Tag> = found.into_iter().map(|t| Tag::new(t.name, t.date)).collect();
        for i in 0..tags.len() {
            tags[i].previous = tags.get(i + 1).map(Tag::related);
            tags[i].next = i.checked_sub(1).map(|j| tags[j].related());
        }
        Ok(tags)
    }

    fn read<S: LogSource + ?Sized>(
        &self,
        source: &S,
        range: &RevisionRange,
    ) -> Result<(Vec<Commit>, usize)> {
        let text = source.log(range)?;
        let count = split_blocks(&text).count();
        let commits = self.parser.parse_log(&text)?;
        debug!(range = %range, blocks = count, commits = commits.len(), "read range");
        Ok((commits, count))
    }

    fn version(&self, tag: Tag, unreleased: bool, commits: Vec<Commit>) -> Version {
        let options = &self.config.options;

        let merge_commits = merge_commits(&commits);
        let revert_commits = revert_commits(&commits);
        let filtered = filter_commits(commits, &options.commits.filters);
        let note_groups = note_groups(&filtered);
        let commit_groups =
            group_commits(filtered, &options.commit_groups, &options.commits.sort_by);

        Version {
            tag,
            unreleased,
            commit_groups,
            merge_commits,
            revert_commits,
            note_groups,
        }
    }
}

/// Indices into `tags` (newest first) selected by `query`
fn select(tags: &[Tag], query: &TagQuery) -> Result<Range<usize>> {
    let index_of = |name: &str| {
        tags.iter()
            .position(|t| t.name == name)
            .ok_or_else(|| ChangelogError::RevisionNotFound(name.to_string()))
    };

    Ok(match query {
        TagQuery::All => 0..tags.len(),
        TagQuery::UpTo(name) => index_of(name)?..tags.len(),
        TagQuery::From(name) => 0..index_of(name)? + 1,
        TagQuery::Between(old, new) => {
            let (a, b) = (index_of(old)?, index_of(new)?);
            a.min(b)..a.max(b) + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use chronicle_core::config::PatternConfig;
    use chronicle_git::MemoryLog;

    fn history() -> MemoryLog {
        let base = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let mut log = MemoryLog::new();
        log.commit("feat(core): one", base)
            .tag("1.0.0")
            .commit("fix(core): two", base + Duration::days(1))
            .tag("1.1.0")
            .commit("feat(cli): three", base + Duration::days(2))
            .tag("2.0.0")
            .commit("fix(cli): four", base + Duration::days(3));
        log
    }

    fn names(tree: &ChangelogTree) -> Vec<&str> {
        tree.versions.iter().map(|v| v.tag.name.as_str()).collect()
    }

    fn generator() -> ChangelogGenerator {
        ChangelogGenerator::new(Config::default()).unwrap()
    }

    #[test]
    fn test_all_versions_with_unreleased_first() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::default())
            .unwrap();
        assert_eq!(names(&tree), vec!["Unreleased", "2.0.0", "1.1.0", "1.0.0"]);
        assert!(tree.versions[0].unreleased);
        assert_eq!(
            tree.versions[0].tag.previous.as_ref().map(|t| t.name.as_str()),
            Some("2.0.0")
        );
    }

    #[test]
    fn test_tags_are_linked() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::default())
            .unwrap();
        let middle = &tree.versions[2].tag;
        assert_eq!(middle.name, "1.1.0");
        assert_eq!(middle.previous.as_ref().unwrap().name, "1.0.0");
        assert_eq!(middle.next.as_ref().unwrap().name, "2.0.0");
        assert!(tree.versions[3].tag.previous.is_none());
    }

    #[test]
    fn test_each_version_covers_its_range() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::default())
            .unwrap();
        let headers: Vec<Vec<&str>> = tree
            .versions
            .iter()
            .map(|v| {
                v.commit_groups
                    .iter()
                    .flat_map(|g| g.commits.iter().map(|c| c.header.as_str()))
                    .collect()
            })
            .collect();
        assert_eq!(
            headers,
            vec![
                vec!["fix(cli): four"],
                vec!["feat(cli): three"],
                vec!["fix(core): two"],
                vec!["feat(core): one"],
            ]
        );
    }

    #[test]
    fn test_up_to_query() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::query("1.1.0"))
            .unwrap();
        assert_eq!(names(&tree), vec!["1.1.0", "1.0.0"]);
    }

    #[test]
    fn test_from_query_includes_head() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::query("1.1.0.."))
            .unwrap();
        assert_eq!(names(&tree), vec!["Unreleased", "2.0.0", "1.1.0"]);
    }

    #[test]
    fn test_between_query_keeps_real_ranges() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::query("1.1.0..2.0.0"))
            .unwrap();
        assert_eq!(names(&tree), vec!["2.0.0", "1.1.0"]);
        let oldest = &tree.versions[1];
        assert_eq!(oldest.commit_groups[0].commits[0].header, "fix(core): two");
    }

    #[test]
    fn test_unknown_tag() {
        let err = generator()
            .generate(&history(), &GenerateOptions::query("foo"))
            .unwrap_err();
        assert!(matches!(err, ChangelogError::RevisionNotFound(ref n) if n == "foo"));
        assert_eq!(err.to_string(), "\"foo\" was not found");
    }

    #[test]
    fn test_unknown_tag_checked_before_empty_history() {
        let err = generator()
            .generate(&MemoryLog::new(), &GenerateOptions::query("foo"))
            .unwrap_err();
        assert!(matches!(err, ChangelogError::RevisionNotFound(_)));
    }

    #[test]
    fn test_empty_history() {
        let err = generator()
            .generate(&MemoryLog::new(), &GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, ChangelogError::NoCommitsFound));
    }

    #[test]
    fn test_no_unreleased_when_head_is_tagged() {
        let mut log = history();
        log.tag("2.1.0");
        let tree = generator().generate(&log, &GenerateOptions::default()).unwrap();
        assert_eq!(names(&tree)[0], "2.1.0");
    }

    #[test]
    fn test_untagged_history_is_one_unreleased_version() {
        let mut log = MemoryLog::new();
        log.commit("feat: only", Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap());
        let tree = generator().generate(&log, &GenerateOptions::default()).unwrap();
        assert_eq!(names(&tree), vec!["Unreleased"]);
        assert!(tree.versions[0].tag.previous.is_none());
    }

    #[test]
    fn test_next_tag_names_head() {
        let tree = generator()
            .generate(&history(), &GenerateOptions::default().with_next_tag("3.0.0"))
            .unwrap();
        assert_eq!(names(&tree)[0], "3.0.0");
        assert!(tree.versions[0].unreleased);
        assert_eq!(tree.versions[1].tag.next.as_ref().unwrap().name, "3.0.0");
    }

    #[test]
    fn test_tag_filter() {
        let mut config = Config::default();
        config.tags.filter = Some(r"^1\.".to_string());
        let tree = ChangelogGenerator::new(config)
            .unwrap()
            .generate(&history(), &GenerateOptions::default())
            .unwrap();
        assert_eq!(names(&tree), vec!["Unreleased", "1.1.0", "1.0.0"]);

        let unreleased: Vec<&str> = tree.versions[0]
            .commit_groups
            .iter()
            .flat_map(|g| g.commits.iter().map(|c| c.header.as_str()))
            .collect();
        assert_eq!(unreleased, vec!["fix(cli): four", "feat(cli): three"]);
    }

    #[test]
    fn test_formatter_uses_configured_fields() {
        let mut config = Config::default();
        config.options.header = PatternConfig::new(r"^(\w+)/(\w+) (.*)$", &["Kind", "Area", "Text"]);
        config.options.commits.filters.clear();
        config.options.commits.sort_by = "Area".to_string();
        config.options.commit_groups.group_by = "Kind".to_string();
        config.output.scope_field = "Area".to_string();
        config.output.subject_field = "Text".to_string();

        let base = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let mut log = MemoryLog::new();
        log.commit("feat/core add parser", base).tag("1.0.0");

        let output = ChangelogGenerator::new(config)
            .unwrap()
            .generate_formatted(&log, &GenerateOptions::default())
            .unwrap();
        assert!(output.contains("### Features\n\n* **core:** add parser\n"));
    }

    #[test]
    fn test_bad_tag_filter() {
        let mut config = Config::default();
        config.tags.filter = Some("(".to_string());
        let err = ChangelogGenerator::new(config).err().unwrap();
        assert!(matches!(err, ChangelogError::PatternCompile { ref rule, .. } if rule == "tags.filter"));
    }
}
