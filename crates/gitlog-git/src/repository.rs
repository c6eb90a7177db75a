//! Git repository operations

use std::path::{Component, Path, PathBuf};

use git2::{Oid, Repository};
use tracing::{debug, info, instrument};

use gitlog_core::error::GitError;

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
        let repo = Repository::open(path).map_err(|e| map_open_error(e, path))?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| map_open_error(e, start_path))?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened git repository");

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get a reference to the inner git2 Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Resolve the current HEAD commit.
    ///
    /// Returns `None` for a repository without commits.
    pub fn head_id(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                debug!("HEAD is unborn, repository has no commits");
                Ok(None)
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Look up a commit by its hex id
    pub fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(id)?;
        Ok(self.repo.find_commit(oid)?)
    }

    /// Convert a path into one relative to the work tree.
    ///
    /// Relative paths are taken to be relative to the work tree already.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(path
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect());
        }

        let workdir = self
            .workdir()
            .ok_or_else(|| GitError::PathOutsideRepository(path.to_path_buf()))?;

        // Paths that do not exist yet cannot be canonicalized, so also try them as given
        let candidate = canonical(path);
        candidate
            .strip_prefix(canonical(workdir))
            .or_else(|_| path.strip_prefix(workdir))
            .map(Path::to_path_buf)
            .map_err(|_| GitError::PathOutsideRepository(path.to_path_buf()))
    }
}

fn map_open_error(e: git2::Error, path: &Path) -> GitError {
    if e.code() == git2::ErrorCode::NotFound {
        GitError::NoRepositoryFound(path.to_path_buf())
    } else {
        GitError::OpenFailed(e.to_string())
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_discover_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // Canonicalize both paths to handle macOS /var -> /private/var symlink
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_no_repository_found_is_distinct() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::discover(temp.path());
        assert!(matches!(result, Err(GitError::NoRepositoryFound(_))));

        let result = GitRepo::open(temp.path());
        assert!(matches!(result, Err(GitError::NoRepositoryFound(_))));
    }

    #[test]
    fn test_empty_repository_has_no_head() {
        let (_temp, repo) = init_repo();
        assert_eq!(repo.head_id().unwrap(), None);
    }

    #[test]
    fn test_head_id_after_commit() {
        let (_temp, repo) = init_repo();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.inner().index().unwrap().write_tree().unwrap();
        let tree = repo.inner().find_tree(tree_id).unwrap();
        let oid = repo
            .inner()
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        assert_eq!(repo.head_id().unwrap(), Some(oid));
        assert_eq!(repo.find_commit(&oid.to_string()).unwrap().id(), oid);
    }

    #[test]
    fn test_relative_path() {
        let (temp, repo) = init_repo();
        let nested = temp.path().join("crates").join("core");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            repo.relative_path(&nested).unwrap(),
            PathBuf::from("crates/core")
        );
        assert_eq!(
            repo.relative_path(Path::new("./crates/core")).unwrap(),
            PathBuf::from("crates/core")
        );
        assert_eq!(repo.relative_path(temp.path()).unwrap(), PathBuf::new());
    }

    #[test]
    fn test_relative_path_not_on_disk() {
        let (temp, repo) = init_repo();
        let workdir = repo.workdir().unwrap().to_path_buf();
        assert_eq!(
            repo.relative_path(&workdir.join("not").join("yet")).unwrap(),
            PathBuf::from("not/yet")
        );
        drop(temp);
    }

    #[test]
    fn test_relative_path_outside_repository() {
        let (_temp, repo) = init_repo();
        let other = TempDir::new().unwrap();
        let result = repo.relative_path(other.path());
        assert!(matches!(result, Err(GitError::PathOutsideRepository(_))));
    }
}
