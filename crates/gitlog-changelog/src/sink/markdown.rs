//! Markdown changelog

use std::path::Path;

use gitlog_git::{CommitInfo, TagInfo};

use super::{FileOutput, RenderOptions, RenderSink, Result};

/// Markdown changelog: a heading per tag and a bullet per commit
#[derive(Debug)]
pub struct MarkdownSink {
    output: FileOutput,
    options: RenderOptions,
}

impl MarkdownSink {
    /// Create the changelog file in `directory`
    pub fn create(directory: &Path, filename: &str, options: RenderOptions) -> Result<Self> {
        Ok(Self {
            output: FileOutput::create(directory, filename)?,
            options,
        })
    }

    /// The file being written
    pub fn path(&self) -> &Path {
        self.output.path()
    }
}

impl RenderSink for MarkdownSink {
    fn name(&self) -> &str {
        "markdown"
    }

    fn render_header(&mut self, title: &str) -> Result<()> {
        self.output.write_str(&format!("# {title}\n\n"))
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<()> {
        let mut text = format!("\n## {}\n\n", tag.name);
        if let Some(message) = &tag.message {
            for line in message.lines() {
                text.push_str(&format!("> {line}\n"));
            }
            text.push('\n');
        }
        self.output.write_str(&text)
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()> {
        // Continuation lines stay inside the list item
        let message = self.options.message(commit).replace('\n', "\n  ");
        self.output.write_str(&format!(
            "* {message} `{}` ({}, {})\n",
            commit.short_id,
            commit.author,
            self.options.format_time(commit.time)
        ))
    }

    fn render_footer(&mut self) -> Result<()> {
        self.output.write_str("\n")
    }

    fn close(&mut self) -> Result<()> {
        self.output.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_commit, sample_tag};
    use tempfile::TempDir;

    #[test]
    fn test_markdown_layout() {
        let temp = TempDir::new().unwrap();
        let mut sink =
            MarkdownSink::create(temp.path(), "changelog.md", RenderOptions::new("%Y-%m-%d", false))
                .unwrap();

        sink.render_header("My project").unwrap();
        sink.render_tag(&sample_tag("v2.0")).unwrap();
        sink.render_commit(&sample_commit("fix crash")).unwrap();
        sink.render_footer().unwrap();
        sink.close().unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        assert!(text.starts_with("# My project\n"));
        assert!(text.contains("## v2.0\n\n> Release v2.0\n"));
        assert!(text.contains("* fix crash `abc1234` (Ada Lovelace, 2023-11-14)\n"));
    }
}
