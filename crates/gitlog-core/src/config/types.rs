//! Configuration types

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::defaults::{
    DEFAULT_CUTOFF, DEFAULT_DATE_FORMAT, DEFAULT_HTML_FILENAME, DEFAULT_HTML_TABLE_FILENAME,
    DEFAULT_JSON_FILENAME, DEFAULT_MARKDOWN_FILENAME, DEFAULT_OUTPUT_DIR,
    DEFAULT_PLAIN_TEXT_FILENAME, DEFAULT_TITLE,
};

/// Main configuration for gitlog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Report title
    pub title: String,

    /// Output configuration
    pub output: OutputConfig,

    /// History traversal configuration
    pub history: HistoryConfig,

    /// Commit filter configuration
    pub filters: FiltersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            title: DEFAULT_TITLE.to_string(),
            output: OutputConfig::default(),
            history: HistoryConfig::default(),
            filters: FiltersConfig::default(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the changelog files are written to
    pub directory: PathBuf,

    /// Echo the changelog to the log while generating
    pub verbose: bool,

    /// Plain text changelog
    pub plain_text: FormatConfig,

    /// Markdown changelog
    pub markdown: FormatConfig,

    /// Standalone HTML page
    pub simple_html: FormatConfig,

    /// HTML containing only a table element, for embedding in other pages
    pub html_table: FormatConfig,

    /// JSON changelog
    pub json: FormatConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbose: false,
            plain_text: FormatConfig::enabled(DEFAULT_PLAIN_TEXT_FILENAME),
            markdown: FormatConfig::disabled(DEFAULT_MARKDOWN_FILENAME),
            simple_html: FormatConfig::enabled(DEFAULT_HTML_FILENAME),
            html_table: FormatConfig::disabled(DEFAULT_HTML_TABLE_FILENAME),
            json: FormatConfig::enabled(DEFAULT_JSON_FILENAME),
        }
    }
}

impl OutputConfig {
    /// Iterate over every format with its config key
    pub fn formats(&self) -> [(&'static str, &FormatConfig); 5] {
        [
            ("plain_text", &self.plain_text),
            ("markdown", &self.markdown),
            ("simple_html", &self.simple_html),
            ("html_table", &self.html_table),
            ("json", &self.json),
        ]
    }

    /// Whether any file-backed format is enabled
    pub fn any_enabled(&self) -> bool {
        self.formats().iter().any(|(_, f)| f.enabled)
    }
}

/// A single output format toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Whether this format is generated
    pub enabled: bool,

    /// File name inside the output directory
    pub filename: String,
}

impl FormatConfig {
    /// An enabled format writing to `filename`
    pub fn enabled(filename: impl Into<String>) -> Self {
        Self {
            enabled: true,
            filename: filename.into(),
        }
    }

    /// A disabled format that would write to `filename`
    pub fn disabled(filename: impl Into<String>) -> Self {
        Self {
            enabled: false,
            filename: filename.into(),
        }
    }
}

/// History traversal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Restrict history to commits touching this path
    pub path: Option<PathBuf>,

    /// Only commits strictly after this date are included
    pub include_commits_after: String,

    /// strftime-style format used for dates in output and for parsing the cutoff
    pub date_format: String,

    /// Render the full commit message instead of the first line
    pub full_message: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_commits_after: DEFAULT_CUTOFF.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            full_message: false,
        }
    }
}

impl HistoryConfig {
    /// Resolve the cutoff instant.
    ///
    /// Falls back to the Unix epoch, which includes all history, when the
    /// date does not match the configured format.
    pub fn cutoff(&self) -> DateTime<Utc> {
        match parse_date(&self.include_commits_after, &self.date_format) {
            Some(cutoff) => {
                debug!(%cutoff, "resolved commit cutoff");
                cutoff
            }
            None => {
                warn!(
                    value = %self.include_commits_after,
                    format = %self.date_format,
                    "could not parse cutoff date; including all history"
                );
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }
}

/// Parse a date with a zoned format, then as naive UTC, then as a bare date.
///
/// Values that do not match `format` are also accepted as RFC 3339 or `YYYY-MM-DD`.
pub fn parse_date(value: &str, format: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() || format.is_empty() {
        return None;
    }

    parse_with_format(value, format)
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|zoned| zoned.with_timezone(&Utc))
        })
        .or_else(|| parse_with_format(value, "%Y-%m-%d"))
}

fn parse_with_format(value: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(zoned) = DateTime::parse_from_str(value, format) {
        return Some(zoned.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Commit filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Drop commits with two or more parents
    pub exclude_merges: bool,

    /// Only keep commits that change files under this directory
    pub module: Option<PathBuf>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            exclude_merges: true,
            module: None,
        }
    }
}
