//! Plain text changelog

use std::path::Path;

use gitlog_git::{CommitInfo, TagInfo};

use super::{FileOutput, RenderOptions, RenderSink, Result};

/// Plain text changelog
#[derive(Debug)]
pub struct PlainTextSink {
    output: FileOutput,
    options: RenderOptions,
}

impl PlainTextSink {
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

impl RenderSink for PlainTextSink {
    fn name(&self) -> &str {
        "plain_text"
    }

    fn render_header(&mut self, title: &str) -> Result<()> {
        let underline = "*".repeat(title.chars().count());
        self.output.write_str(&format!("{title}\n{underline}\n\n"))
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<()> {
        let underline = "-".repeat(tag.name.chars().count());
        self.output
            .write_str(&format!("\n{}\n{underline}\n", tag.name))
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()> {
        let message = self.options.message(commit).replace('\n', "\n    ");
        self.output.write_str(&format!(
            "{} {} ({})\n    {}\n",
            self.options.format_time(commit.time),
            commit.short_id,
            commit.author,
            message
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
    fn test_plain_text_layout() {
        let temp = TempDir::new().unwrap();
        let options = RenderOptions::new("%Y-%m-%d", false);
        let mut sink = PlainTextSink::create(temp.path(), "changelog.txt", options).unwrap();

        sink.render_header("Release").unwrap();
        sink.render_tag(&sample_tag("v1.0")).unwrap();
        sink.render_commit(&sample_commit("add parser")).unwrap();
        sink.render_footer().unwrap();
        sink.close().unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        assert!(text.starts_with("Release\n*******\n"));
        assert!(text.contains("\nv1.0\n----\n"));
        assert!(text.contains("2023-11-14 abc1234 (Ada Lovelace)\n    add parser\n"));
        assert!(!text.contains("Details about"));
    }

    #[test]
    fn test_full_message_is_indented() {
        let temp = TempDir::new().unwrap();
        let options = RenderOptions::new("%Y", true);
        let mut sink = PlainTextSink::create(temp.path(), "changelog.txt", options).unwrap();
        sink.render_commit(&sample_commit("add parser")).unwrap();
        sink.close().unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        assert!(text.contains("    add parser\n    \n    Details about"));
    }

    #[test]
    fn test_close_without_renders() {
        let temp = TempDir::new().unwrap();
        let mut sink =
            PlainTextSink::create(temp.path(), "changelog.txt", RenderOptions::default()).unwrap();
        sink.close().unwrap();
        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "");
    }
}
