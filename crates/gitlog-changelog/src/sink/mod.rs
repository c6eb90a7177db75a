//! Render sinks
//!
//! Every output format implements the same five-call lifecycle: one header,
//! any number of tags and commits in walk order (newest first), one footer,
//! and a final close.

mod html;
mod json;
mod log;
mod markdown;
mod output;
mod plain_text;
mod registry;

pub use html::HtmlSink;
pub use json::JsonSink;
pub use log::LogSink;
pub use markdown::MarkdownSink;
pub use output::FileOutput;
pub use plain_text::PlainTextSink;
pub use registry::sinks_from_config;

use chrono::format::{Item, StrftimeItems};
use chrono::{TimeZone, Utc};
use gitlog_core::config::DEFAULT_DATE_FORMAT;
use gitlog_core::error::RenderError;
use gitlog_git::{CommitInfo, TagInfo};
use tracing::warn;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Trait for changelog output formats
pub trait RenderSink: Send {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Called exactly once, first
    fn render_header(&mut self, title: &str) -> Result<()>;

    /// Called before the commit the tag points at, even if that commit is filtered out
    fn render_tag(&mut self, tag: &TagInfo) -> Result<()>;

    /// Called for every commit that passed the filter chain
    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()>;

    /// Called exactly once, after the last tag or commit
    fn render_footer(&mut self) -> Result<()>;

    /// Called exactly once, last. Must succeed even if nothing was rendered.
    fn close(&mut self) -> Result<()>;
}

/// Presentation settings handed to each sink at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    date_format: String,
    full_message: bool,
}

impl RenderOptions {
    /// Create options, falling back to the default date format if `date_format` is invalid
    pub fn new(date_format: impl Into<String>, full_message: bool) -> Self {
        let mut date_format = date_format.into();
        let invalid = date_format.is_empty()
            || StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error));
        if invalid {
            warn!(format = %date_format, "invalid date format, using default");
            date_format = DEFAULT_DATE_FORMAT.to_string();
        }

        Self {
            date_format,
            full_message,
        }
    }

    /// The strftime format for dates
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Whether full commit messages are rendered
    pub fn full_message(&self) -> bool {
        self.full_message
    }

    /// Format a Unix timestamp in UTC
    pub fn format_time(&self, seconds: i64) -> String {
        match Utc.timestamp_opt(seconds, 0).single() {
            Some(time) => time.format(&self.date_format).to_string(),
            None => seconds.to_string(),
        }
    }

    /// The message to show for a commit
    pub fn message<'a>(&self, commit: &'a CommitInfo) -> &'a str {
        commit.display_message(self.full_message)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, false)
    }
}
