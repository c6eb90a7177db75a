//! HTML changelog, as a full page or as a bare table for embedding

use std::path::Path;

use gitlog_git::{CommitInfo, TagInfo};

use super::{FileOutput, RenderOptions, RenderSink, Result};

const STYLE: &str = "body { font-family: sans-serif; }\n\
table.changelog { border-collapse: collapse; }\n\
table.changelog td { padding: 0.2em 0.6em; vertical-align: top; }\n\
tr.tag h2 { margin: 1em 0 0.3em; }\n\
td.date, td.author { white-space: nowrap; color: #555; }\n";

/// HTML changelog
#[derive(Debug)]
pub struct HtmlSink {
    output: FileOutput,
    options: RenderOptions,
    table_only: bool,
}

impl HtmlSink {
    /// A standalone HTML page
    pub fn page(directory: &Path, filename: &str, options: RenderOptions) -> Result<Self> {
        Self::create(directory, filename, options, false)
    }

    /// Only a `<table>` element, for inclusion in other pages
    pub fn table(directory: &Path, filename: &str, options: RenderOptions) -> Result<Self> {
        Self::create(directory, filename, options, true)
    }

    fn create(
        directory: &Path,
        filename: &str,
        options: RenderOptions,
        table_only: bool,
    ) -> Result<Self> {
        Ok(Self {
            output: FileOutput::create(directory, filename)?,
            options,
            table_only,
        })
    }

    /// The file being written
    pub fn path(&self) -> &Path {
        self.output.path()
    }
}

impl RenderSink for HtmlSink {
    fn name(&self) -> &str {
        if self.table_only {
            "html_table"
        } else {
            "html"
        }
    }

    fn render_header(&mut self, title: &str) -> Result<()> {
        let title = escape(title);
        let mut text = String::new();
        if !self.table_only {
            text.push_str(&format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
            ));
        }
        text.push_str("<table class=\"changelog\">\n");
        self.output.write_str(&text)
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<()> {
        self.output.write_str(&format!(
            "<tr class=\"tag\"><td colspan=\"3\"><h2>{}</h2></td></tr>\n",
            escape(&tag.name)
        ))
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<()> {
        let message = escape(self.options.message(commit)).replace('\n', "<br>\n");
        self.output.write_str(&format!(
            "<tr class=\"commit\"><td class=\"date\">{}</td><td class=\"message\" title=\"{}\">{}</td><td class=\"author\">{}</td></tr>\n",
            escape(&self.options.format_time(commit.time)),
            commit.short_id,
            message,
            escape(&commit.author)
        ))
    }

    fn render_footer(&mut self) -> Result<()> {
        let mut text = String::from("</table>\n");
        if !self.table_only {
            text.push_str("</body>\n</html>\n");
        }
        self.output.write_str(&text)
    }

    fn close(&mut self) -> Result<()> {
        self.output.close()
    }
}

/// Escape text for HTML content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
