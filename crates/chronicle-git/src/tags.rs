//! Tag operations

use tracing::{debug, instrument, warn};

use crate::log::git_date;
use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// List all tags, dated by the committer time of the commit they point to.
    ///
    /// Annotated tags are peeled to their target. Tags that do not lead to a
    /// commit are skipped.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            let commit = self
                .repo
                .find_object(oid, None)
                .and_then(|object| object.peel_to_commit());

            match commit {
                Ok(commit) => {
                    let date = git_date(commit.committer().when().seconds());
                    tags.push(TagInfo::new(name, date));
                }
                Err(e) => warn!(tag = %name, error = %e, "skipping tag without a commit"),
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }
}
