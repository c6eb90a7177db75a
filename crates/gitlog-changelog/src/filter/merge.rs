//! Merge commit filter

use gitlog_git::{CommitInfo, GitRepo};

use super::CommitFilter;

/// Filters out commits that only merge two or more branches.
///
/// Non-merge commits have a single parent, or none for a root commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeCommitFilter;

impl CommitFilter for MergeCommitFilter {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn accept(&self, commit: &CommitInfo, _repo: &GitRepo) -> bool {
        commit.parent_count() < 2
    }
}
