//! Commit filters
//!
//! A commit is rendered only when every filter in the chain accepts it.

mod merge;
mod module;

pub use merge::MergeCommitFilter;
pub use module::ModuleCommitFilter;

use gitlog_core::config::FiltersConfig;
use gitlog_git::{CommitInfo, GitRepo};
use tracing::debug;

/// Trait for commit filters. Filters must not modify the repository.
pub trait CommitFilter: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Returns true if the commit should be rendered
    fn accept(&self, commit: &CommitInfo, repo: &GitRepo) -> bool;
}

/// Evaluate the filter chain in order, stopping at the first rejection
pub fn should_render(
    commit: &CommitInfo,
    repo: &GitRepo,
    filters: &[Box<dyn CommitFilter>],
) -> bool {
    for filter in filters {
        if !filter.accept(commit, repo) {
            debug!(commit = %commit.short_id, filter = filter.name(), "commit filtered out");
            return false;
        }
    }
    true
}

/// The default chain: merge commits are excluded
pub fn default_filters() -> Vec<Box<dyn CommitFilter>> {
    vec![Box::new(MergeCommitFilter)]
}

/// Build the chain described by the configuration
pub fn filters_from_config(config: &FiltersConfig) -> Vec<Box<dyn CommitFilter>> {
    let mut filters: Vec<Box<dyn CommitFilter>> = Vec::new();

    if config.exclude_merges {
        filters.push(Box::new(MergeCommitFilter));
    }

    if let Some(module) = &config.module {
        debug!(module = %module.display(), "module commit filter enabled");
        filters.push(Box::new(ModuleCommitFilter::new(module)));
    }

    filters
}
