//! Echo the changelog to the log

use gitlog_git::{CommitInfo, TagInfo};
use tracing::info;

use super::{RenderOptions, RenderSink, Result};

/// Writes each changelog entry as an info event on the `gitlog::changelog` target
#[derive(Debug, Default)]
pub struct LogSink {
    options: RenderOptions,
}

impl LogSink {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl RenderSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn render_header(&mut self, title: &str) -> Result<()> {
        info!(target: "gitlog::changelog", "{title}");
        Ok(())
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<()> {
        info!(target: "gitlog::changelog", tag = %tag.name, "tag {}", tag.name);
        Ok(())
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()> {
        info!(
            target: "gitlog::changelog",
            commit = %commit.short_id,
            author = %commit.author,
            "{} {}",
            self.options.format_time(commit.time),
            self.options.message(commit)
        );
        Ok(())
    }

    fn render_footer(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
