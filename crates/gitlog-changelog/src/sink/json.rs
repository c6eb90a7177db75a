//! JSON changelog

use std::io::Write;
use std::path::Path;

use gitlog_git::{CommitInfo, TagInfo};
use serde::Serialize;

use super::{FileOutput, RenderOptions, RenderSink, Result};

#[derive(Debug, Serialize)]
struct Document {
    title: String,
    entries: Vec<Entry>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Entry {
    Tag {
        name: String,
        message: Option<String>,
        tagger: Option<String>,
        date: Option<String>,
    },
    Commit {
        id: String,
        short_id: String,
        message: String,
        author: String,
        email: String,
        date: String,
    },
}

/// JSON changelog. Entries are buffered and the document is written at the footer.
#[derive(Debug)]
pub struct JsonSink {
    output: FileOutput,
    options: RenderOptions,
    document: Document,
}

impl JsonSink {
    /// Create the changelog file in `directory`
    pub fn create(directory: &Path, filename: &str, options: RenderOptions) -> Result<Self> {
        Ok(Self {
            output: FileOutput::create(directory, filename)?,
            options,
            document: Document {
                title: String::new(),
                entries: Vec::new(),
            },
        })
    }

    /// The file being written
    pub fn path(&self) -> &Path {
        self.output.path()
    }
}

impl RenderSink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn render_header(&mut self, title: &str) -> Result<()> {
        self.document.title = title.to_string();
        Ok(())
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<()> {
        self.document.entries.push(Entry::Tag {
            name: tag.name.clone(),
            message: tag.message.clone(),
            tagger: tag.tagger.as_ref().map(|t| t.name.clone()),
            date: tag.tagger.as_ref().map(|t| self.options.format_time(t.time)),
        });
        Ok(())
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()> {
        self.document.entries.push(Entry::Commit {
            id: commit.id.clone(),
            short_id: commit.short_id.clone(),
            message: self.options.message(commit).to_string(),
            author: commit.author.clone(),
            email: commit.author_email.clone(),
            date: self.options.format_time(commit.time),
        });
        Ok(())
    }

    fn render_footer(&mut self) -> Result<()> {
        let writer = self.output.writer()?;
        serde_json::to_writer_pretty(&mut *writer, &self.document)?;
        writer.write_all(b"\n")?;
        Ok(())
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
    fn test_json_document() {
        let temp = TempDir::new().unwrap();
        let options = RenderOptions::new("%Y-%m-%d", false);
        let mut sink = JsonSink::create(temp.path(), "changelog.json", options).unwrap();

        sink.render_header("Project").unwrap();
        sink.render_tag(&sample_tag("v1.0")).unwrap();
        sink.render_commit(&sample_commit("first")).unwrap();
        sink.render_footer().unwrap();
        sink.close().unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "Project");

        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["type"], "tag");
        assert_eq!(entries[0]["name"], "v1.0");
        assert_eq!(entries[0]["tagger"], "Tagger");
        assert_eq!(entries[1]["type"], "commit");
        assert_eq!(entries[1]["short_id"], "abc1234");
        assert_eq!(entries[1]["message"], "first");
        assert_eq!(entries[1]["date"], "2023-11-14");
    }

    #[test]
    fn test_nothing_written_without_footer() {
        let temp = TempDir::new().unwrap();
        let mut sink =
            JsonSink::create(temp.path(), "changelog.json", RenderOptions::default()).unwrap();
        sink.render_header("Project").unwrap();
        sink.close().unwrap();
        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "");
    }
}
