//! Generate command

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tracing::{info, warn};

use gitlog_changelog::{
    filters_from_config, sinks_from_config, ChangelogGenerator, GenerationReport, RenderOptions,
};
use gitlog_core::config::{load_config_or_default, validate_config, Config};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Generate changelog files from the repository history
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Changelog title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Directory the changelog files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only walk commits that touch this path
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Only include commits made after this date
    #[arg(long, value_name = "DATE")]
    pub since: Option<String>,

    /// strftime format for dates, also used to parse --since
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Render complete commit messages instead of the summary line
    #[arg(long)]
    pub full_message: bool,

    /// Only render commits that change files under this directory
    #[arg(long, value_name = "DIR")]
    pub module: Option<PathBuf>,

    /// Render merge commits too
    #[arg(long)]
    pub include_merges: bool,

    /// Output formats to generate, replacing the configured set
    #[arg(long = "format", value_enum, value_name = "FORMAT")]
    pub formats: Vec<SinkFormat>,

    /// Echo the changelog to the console while generating
    #[arg(long)]
    pub echo: bool,
}

/// Changelog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkFormat {
    /// Plain text
    Text,
    /// Markdown
    Markdown,
    /// Standalone HTML page
    Html,
    /// HTML table for embedding
    HtmlTable,
    /// JSON document
    Json,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(formats = ?self.formats, since = ?self.since, "executing generate command");
        let cwd = std::env::current_dir()?;
        let (mut config, config_path) = load_config_or_default(&cwd);
        self.apply(&mut config, &cwd);
        validate_config(&config)?;

        // Relative output directories are resolved next to the config file
        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        let mut generator =
            ChangelogGenerator::new().with_filters(filters_from_config(&config.filters));
        if let Some(path) = &config.history.path {
            generator = generator.with_path_filter(path.clone());
        }

        let open = match generator.open(&cwd) {
            Ok(open) => open,
            Err(e) if e.is_no_repository() => {
                warn!(dir = %cwd.display(), "no git repository found");
                if !cli.quiet {
                    output::warning("No git repository found, skipping changelog generation");
                }
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "could not read git repository");
                if !cli.quiet {
                    output::warning(&format!("Could not read git repository: {e}"));
                }
                return Ok(());
            }
        };

        let options = RenderOptions::new(
            config.history.date_format.as_str(),
            config.history.full_message,
        );
        let sinks = match sinks_from_config(&config.output, &base_dir, &options) {
            Ok(sinks) => sinks,
            Err(e) => {
                warn!(error = %e, "could not create changelog files");
                if !cli.quiet {
                    output::warning(&format!("Could not create changelog files: {e}"));
                }
                return Ok(());
            }
        };
        if sinks.is_empty() {
            if !cli.quiet {
                output::warning("No output formats enabled");
            }
            return Ok(());
        }

        let report = open
            .with_sinks(sinks)
            .generate(&config.title, config.history.cutoff());

        match cli.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text if !cli.quiet => {
                print_summary(&report, &base_dir.join(&config.output.directory));
            }
            OutputFormat::Text => {}
        }

        if !report.is_complete() {
            warn!(
                failures = report.sink_failures.len(),
                aborted = report.traversal_error.is_some(),
                "changelog is incomplete"
            );
        }

        Ok(())
    }

    /// Apply command line overrides. Paths given here are relative to `cwd`.
    fn apply(&self, config: &mut Config, cwd: &Path) {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = cwd.join(dir);
        }
        if let Some(path) = &self.path {
            config.history.path = Some(cwd.join(path));
        }
        if let Some(format) = &self.date_format {
            config.history.date_format = format.clone();
        }
        if let Some(since) = &self.since {
            config.history.include_commits_after = since.clone();
        }
        if self.full_message {
            config.history.full_message = true;
        }
        if let Some(module) = &self.module {
            config.filters.module = Some(cwd.join(module));
        }
        if self.include_merges {
            config.filters.exclude_merges = false;
        }
        if !self.formats.is_empty() {
            let output = &mut config.output;
            output.plain_text.enabled = self.formats.contains(&SinkFormat::Text);
            output.markdown.enabled = self.formats.contains(&SinkFormat::Markdown);
            output.simple_html.enabled = self.formats.contains(&SinkFormat::Html);
            output.html_table.enabled = self.formats.contains(&SinkFormat::HtmlTable);
            output.json.enabled = self.formats.contains(&SinkFormat::Json);
        }
        if self.echo {
            config.output.verbose = true;
        }
    }
}

fn print_summary(report: &GenerationReport, directory: &Path) {
    if report.is_complete() {
        output::success(&format!("Changelog written to {}", output::path(directory)));
    } else {
        output::warning(&format!(
            "Changelog written to {} with errors",
            output::path(directory)
        ));
    }

    println!("{}", output::key_value("commits", &report.commits_rendered.to_string()));
    println!("{}", output::key_value("tags", &report.tags_rendered.to_string()));
    if report.commits_filtered > 0 {
        println!("{}", output::key_value("filtered", &report.commits_filtered.to_string()));
    }
    if report.commits_before_cutoff > 0 {
        println!(
            "{}",
            output::key_value("before cutoff", &report.commits_before_cutoff.to_string())
        );
    }

    for failure in &report.sink_failures {
        output::warning(&format!(
            "{} failed at {}: {}",
            failure.sink, failure.stage, failure.message
        ));
    }
    if let Some(error) = &report.traversal_error {
        output::warning(&format!("History walk stopped early: {error}"));
    }
    if report.commits_rendered == 0 && report.is_complete() {
        output::info("No commits matched");
    }
}
