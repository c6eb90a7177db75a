//! Commit history traversal

use std::path::{Path, PathBuf};

use git2::{Oid, Revwalk, Sort, Tree};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

/// Counters for a finished walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Commits read from the commit graph
    pub visited: usize,
    /// Commits handed to the caller
    pub yielded: usize,
}

/// Lazy, single-pass walk over the commits reachable from HEAD, newest first.
///
/// The underlying revwalk is released when the walk is dropped or finished.
pub struct History<'repo> {
    repo: &'repo GitRepo,
    revwalk: Option<Revwalk<'repo>>,
    path_filter: Option<PathBuf>,
    stats: WalkStats,
    failed: bool,
}

impl GitRepo {
    /// Walk history from HEAD, optionally limited to commits touching a path.
    ///
    /// An empty repository produces an empty walk.
    #[instrument(skip(self), fields(path_filter = ?path_filter))]
    pub fn history(&self, path_filter: Option<&Path>) -> Result<History<'_>> {
        let path_filter = match path_filter {
            Some(path) => {
                let relative = self.relative_path(path)?;
                if relative.as_os_str().is_empty() {
                    None
                } else {
                    Some(relative)
                }
            }
            None => None,
        };

        let revwalk = match self.head_id()? {
            Some(head) => {
                let mut revwalk = self.repo.revwalk()?;
                revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
                revwalk.push(head)?;
                Some(revwalk)
            }
            None => {
                debug!("repository has no commits, history is empty");
                None
            }
        };

        Ok(History {
            repo: self,
            revwalk,
            path_filter,
            stats: WalkStats::default(),
            failed: false,
        })
    }
}

impl History<'_> {
    /// The path this walk is limited to, relative to the work tree
    pub fn path_filter(&self) -> Option<&Path> {
        self.path_filter.as_deref()
    }

    /// Counters so far
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// End the walk and release the traversal
    pub fn finish(self) -> WalkStats {
        debug!(
            visited = self.stats.visited,
            yielded = self.stats.yielded,
            "history walk finished"
        );
        self.stats
    }

    fn load(&self, oid: Oid) -> Result<Option<CommitInfo>> {
        let commit = self.repo.repo.find_commit(oid)?;

        if let Some(path) = &self.path_filter {
            if !touches_path(&commit, path)? {
                return Ok(None);
            }
        }

        Ok(Some(CommitInfo::from(&commit)))
    }
}

impl Iterator for History<'_> {
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let oid = match self.revwalk.as_mut()?.next()? {
                Ok(oid) => oid,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.stats.visited += 1;

            match self.load(oid) {
                Ok(Some(commit)) => {
                    self.stats.yielded += 1;
                    return Some(Ok(commit));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// A root commit touches `path` if it contains it; any other commit touches it
/// if the entry differs from the entry in every parent.
fn touches_path(commit: &git2::Commit<'_>, path: &Path) -> Result<bool> {
    let entry = entry_id(&commit.tree()?, path)?;

    if commit.parent_count() == 0 {
        return Ok(entry.is_some());
    }

    for parent in commit.parents() {
        if entry_id(&parent.tree()?, path)? == entry {
            return Ok(false);
        }
    }

    Ok(true)
}

fn entry_id(tree: &Tree<'_>, path: &Path) -> Result<Option<Oid>> {
    match tree.get_path(path) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
