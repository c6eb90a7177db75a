//! Build the sink list from configuration

use std::path::{Path, PathBuf};

use gitlog_core::config::OutputConfig;
use tracing::{debug, warn};

use super::{
    HtmlSink, JsonSink, LogSink, MarkdownSink, PlainTextSink, RenderOptions, RenderSink, Result,
};

/// Create one sink per enabled format, plus a [`LogSink`] when `output.verbose` is set.
///
/// The output directory is resolved against `base_dir`. If any sink cannot be
/// created the error is returned, no sinks are handed out and the files
/// created before the failure are removed again.
pub fn sinks_from_config(
    output: &OutputConfig,
    base_dir: &Path,
    options: &RenderOptions,
) -> Result<Vec<Box<dyn RenderSink>>> {
    let directory = base_dir.join(&output.directory);
    let mut created = Vec::new();

    let mut sinks = match file_sinks(output, &directory, options, &mut created) {
        Ok(sinks) => sinks,
        Err(e) => {
            remove_created(&created);
            return Err(e);
        }
    };
    if output.verbose {
        sinks.push(Box::new(LogSink::new(options.clone())));
    }

    debug!(
        count = sinks.len(),
        directory = %directory.display(),
        "created render sinks"
    );
    Ok(sinks)
}

fn file_sinks(
    output: &OutputConfig,
    directory: &Path,
    options: &RenderOptions,
    created: &mut Vec<PathBuf>,
) -> Result<Vec<Box<dyn RenderSink>>> {
    let mut sinks: Vec<Box<dyn RenderSink>> = Vec::new();

    if output.plain_text.enabled {
        let sink = PlainTextSink::create(directory, &output.plain_text.filename, options.clone())?;
        created.push(sink.path().to_path_buf());
        sinks.push(Box::new(sink));
    }
    if output.simple_html.enabled {
        let sink = HtmlSink::page(directory, &output.simple_html.filename, options.clone())?;
        created.push(sink.path().to_path_buf());
        sinks.push(Box::new(sink));
    }
    if output.html_table.enabled {
        let sink = HtmlSink::table(directory, &output.html_table.filename, options.clone())?;
        created.push(sink.path().to_path_buf());
        sinks.push(Box::new(sink));
    }
    if output.markdown.enabled {
        let sink = MarkdownSink::create(directory, &output.markdown.filename, options.clone())?;
        created.push(sink.path().to_path_buf());
        sinks.push(Box::new(sink));
    }
    if output.json.enabled {
        let sink = JsonSink::create(directory, &output.json.filename, options.clone())?;
        created.push(sink.path().to_path_buf());
        sinks.push(Box::new(sink));
    }

    Ok(sinks)
}

fn remove_created(paths: &[PathBuf]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed partial changelog file"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove changelog file"),
        }
    }
}
