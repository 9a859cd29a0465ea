//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use chronicle_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether HEAD points at a branch with no commits yet
    pub fn is_unborn(&self) -> bool {
        match self.repo.head() {
            Ok(_) => false,
            Err(e) => matches!(
                e.code(),
                git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
            ),
        }
    }

    /// Resolve a revision expression (tag, branch, hash, `HEAD`) to a commit id
    pub fn resolve(&self, revision: &str) -> Result<git2::Oid> {
        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|_| GitError::UnknownRevision(revision.to_string()))?;
        let commit = object.peel_to_commit().map_err(GitError::Git2)?;
        Ok(commit.id())
    }
}
