//! Outcome of a generation run

use std::fmt;

use serde::Serialize;

/// The sink call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStage {
    Header,
    Tag,
    Commit,
    Footer,
    Close,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Header => "header",
            Self::Tag => "tag",
            Self::Commit => "commit",
            Self::Footer => "footer",
            Self::Close => "close",
        };
        f.write_str(stage)
    }
}

/// A failed sink call. Generation continues after recording it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkFailure {
    pub sink: String,
    pub stage: RenderStage,
    pub message: String,
}

/// Counters and failures of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Commits produced by the history walk
    pub commits_walked: usize,
    /// Commits at or before the cutoff, skipped entirely
    pub commits_before_cutoff: usize,
    /// Commits rejected by the filter chain
    pub commits_filtered: usize,
    /// Commits handed to the sinks
    pub commits_rendered: usize,
    /// Tags handed to the sinks
    pub tags_rendered: usize,
    /// Sink calls that returned an error
    pub sink_failures: Vec<SinkFailure>,
    /// Set when the history walk aborted
    pub traversal_error: Option<String>,
}

impl GenerationReport {
    /// True when every sink call succeeded and the walk reached the end of history
    pub fn is_complete(&self) -> bool {
        self.sink_failures.is_empty() && self.traversal_error.is_none()
    }

    pub(crate) fn record_failure(&mut self, sink: &str, stage: RenderStage, message: String) {
        self.sink_failures.push(SinkFailure {
            sink: sink.to_string(),
            stage,
            message,
        });
    }
}
