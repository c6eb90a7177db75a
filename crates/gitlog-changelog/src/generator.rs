//! Changelog generation

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gitlog_core::error::{GitError, RenderError};
use gitlog_git::{GitRepo, TagIndex};
use tracing::{debug, info, instrument, warn};

use crate::filter::{default_filters, should_render, CommitFilter};
use crate::report::{GenerationReport, RenderStage};
use crate::sink::RenderSink;

/// Changelog generator
///
/// Holds the sinks and the filter chain until a repository is opened.
pub struct ChangelogGenerator {
    sinks: Vec<Box<dyn RenderSink>>,
    filters: Vec<Box<dyn CommitFilter>>,
    path_filter: Option<PathBuf>,
}

impl ChangelogGenerator {
    /// Create a generator with the default filter chain and no sinks
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            filters: default_filters(),
            path_filter: None,
        }
    }

    /// Add a sink
    pub fn with_sink<S: RenderSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add several sinks, keeping their order
    pub fn with_sinks(mut self, sinks: impl IntoIterator<Item = Box<dyn RenderSink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Append a filter to the chain
    pub fn with_filter<F: CommitFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Replace the whole filter chain
    pub fn with_filters(mut self, filters: Vec<Box<dyn CommitFilter>>) -> Self {
        self.filters = filters;
        self
    }

    /// Limit the history walk to commits touching `path`
    pub fn with_path_filter(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_filter = Some(path.into());
        self
    }

    /// Number of configured sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Discover the repository containing `start` and index its tags.
    ///
    /// No sink is called here, so a missing repository leaves every output untouched.
    #[instrument(skip(self), fields(start = %start.display()))]
    pub fn open(self, start: &Path) -> Result<OpenGenerator, GitError> {
        let repo = GitRepo::discover(start)?;
        let tags = repo.tag_index()?;
        debug!(tags = tags.len(), "repository ready");

        Ok(OpenGenerator {
            repo,
            tags,
            sinks: self.sinks,
            filters: self.filters,
            path_filter: self.path_filter,
        })
    }

    /// Open the repository at `start` and generate in one step
    pub fn generate_since(
        self,
        start: &Path,
        title: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<GenerationReport, GitError> {
        Ok(self.open(start)?.generate(title, cutoff))
    }
}

impl Default for ChangelogGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A generator bound to an open repository with its tag index built
pub struct OpenGenerator {
    repo: GitRepo,
    tags: TagIndex,
    sinks: Vec<Box<dyn RenderSink>>,
    filters: Vec<Box<dyn CommitFilter>>,
    path_filter: Option<PathBuf>,
}

impl OpenGenerator {
    /// The open repository
    pub fn repository(&self) -> &GitRepo {
        &self.repo
    }

    /// Annotated tags keyed by target commit
    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    /// Add sinks once the repository is known to exist
    pub fn with_sinks(mut self, sinks: impl IntoIterator<Item = Box<dyn RenderSink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Render every commit newer than `cutoff` to every sink.
    ///
    /// Sink failures are recorded and generation continues. Footer and close
    /// reach every sink even when the walk aborts.
    #[instrument(skip(self), fields(cutoff = %cutoff))]
    pub fn generate(self, title: &str, cutoff: DateTime<Utc>) -> GenerationReport {
        let OpenGenerator {
            repo,
            tags,
            mut sinks,
            filters,
            path_filter,
        } = self;
        let mut report = GenerationReport::default();

        broadcast(&mut sinks, &mut report, RenderStage::Header, |sink| {
            sink.render_header(title)
        });

        walk(
            &repo,
            &tags,
            &filters,
            path_filter.as_deref(),
            cutoff.timestamp(),
            &mut sinks,
            &mut report,
        );

        broadcast(&mut sinks, &mut report, RenderStage::Footer, |sink| sink.render_footer());
        broadcast(&mut sinks, &mut report, RenderStage::Close, |sink| sink.close());

        info!(
            walked = report.commits_walked,
            rendered = report.commits_rendered,
            tags = report.tags_rendered,
            failures = report.sink_failures.len(),
            "changelog generated"
        );
        report
    }
}

fn walk(
    repo: &GitRepo,
    tags: &TagIndex,
    filters: &[Box<dyn CommitFilter>],
    path_filter: Option<&Path>,
    cutoff: i64,
    sinks: &mut [Box<dyn RenderSink>],
    report: &mut GenerationReport,
) {
    let mut history = match repo.history(path_filter) {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "failed to start history walk");
            report.traversal_error = Some(e.to_string());
            return;
        }
    };

    for item in history.by_ref() {
        let commit = match item {
            Ok(commit) => commit,
            Err(e) => {
                warn!(error = %e, "history walk aborted");
                report.traversal_error = Some(e.to_string());
                break;
            }
        };
        report.commits_walked += 1;

        if commit.time <= cutoff {
            report.commits_before_cutoff += 1;
            continue;
        }

        for tag in tags.tags_for(&commit.id) {
            report.tags_rendered += 1;
            broadcast(sinks, report, RenderStage::Tag, |sink| sink.render_tag(tag));
        }

        if should_render(&commit, repo, filters) {
            report.commits_rendered += 1;
            broadcast(sinks, report, RenderStage::Commit, |sink| sink.render_commit(&commit));
        } else {
            report.commits_filtered += 1;
        }
    }

    history.finish();
}

/// Make the same call on every sink in order, recording failures
fn broadcast<F>(
    sinks: &mut [Box<dyn RenderSink>],
    report: &mut GenerationReport,
    stage: RenderStage,
    mut call: F,
) where
    F: FnMut(&mut dyn RenderSink) -> Result<(), RenderError>,
{
    for sink in sinks.iter_mut() {
        if let Err(e) = call(sink.as_mut()) {
            warn!(sink = sink.name(), %stage, error = %e, "sink call failed");
            report.record_failure(sink.name(), stage, e.to_string());
        }
    }
}
