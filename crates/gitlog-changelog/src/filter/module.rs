//! Directory-scoped commit filter

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use gitlog_git::{CommitInfo, GitRepo};
use tracing::{debug, instrument, warn};

use super::CommitFilter;

/// Accepts only commits that change files under a directory.
///
/// Root commits are checked against their whole tree; other commits against
/// the diff to their first parent. When the changed paths cannot be computed
/// the commit is accepted, and the event is counted in
/// [`ModuleCommitFilter::fail_open_count`].
#[derive(Debug)]
pub struct ModuleCommitFilter {
    directory: PathBuf,
    resolved: OnceLock<PathBuf>,
    fail_open: AtomicUsize,
}

impl ModuleCommitFilter {
    /// Create a filter for `directory`, absolute or relative to the work tree
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            resolved: OnceLock::new(),
            fail_open: AtomicUsize::new(0),
        }
    }

    /// The configured directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// How many commits were accepted because their changes could not be read
    pub fn fail_open_count(&self) -> usize {
        self.fail_open.load(Ordering::Relaxed)
    }

    fn scope(&self, repo: &GitRepo) -> gitlog_git::Result<&Path> {
        if let Some(scope) = self.resolved.get() {
            return Ok(scope);
        }
        let relative = repo.relative_path(&self.directory)?;
        debug!(scope = %relative.display(), "resolved module directory");
        Ok(self.resolved.get_or_init(|| relative))
    }

    fn changed_in_scope(&self, commit: &CommitInfo, repo: &GitRepo) -> gitlog_git::Result<bool> {
        let scope = self.scope(repo)?;

        let paths = if commit.is_root() {
            repo.tree_paths(&commit.id)?
        } else {
            repo.changed_paths(&commit.id)?
        };

        match paths.iter().find(|path| path.starts_with(scope)) {
            Some(path) => {
                debug!(commit = %commit.short_id, path = %path.display(), "commit touches module");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl CommitFilter for ModuleCommitFilter {
    fn name(&self) -> &'static str {
        "module"
    }

    #[instrument(skip(self, commit, repo), fields(commit = %commit.short_id))]
    fn accept(&self, commit: &CommitInfo, repo: &GitRepo) -> bool {
        match self.changed_in_scope(commit, repo) {
            Ok(accepted) => accepted,
            Err(e) => {
                self.fail_open.fetch_add(1, Ordering::Relaxed);
                warn!(
                    target: "gitlog::filter::fail_open",
                    commit = %commit.id,
                    module = %self.directory.display(),
                    error = %e,
                    "could not compute changed paths, accepting commit"
                );
                true
            }
        }
    }
}
