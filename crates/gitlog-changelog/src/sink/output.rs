//! Buffered file output shared by the file-backed sinks

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gitlog_core::error::RenderError;
use tracing::{debug, info};

use super::Result;

/// A changelog file, writable until closed
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileOutput {
    /// Create `directory/filename`, creating the directory if needed
    pub fn create(directory: &Path, filename: &str) -> Result<Self> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(filename);
        let file = File::create(&path)?;
        info!(path = %path.display(), "created changelog file");

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// The file being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append text
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        match self.writer.as_mut() {
            Some(writer) => Ok(writer.write_all(text.as_bytes())?),
            None => Err(RenderError::Closed(self.path.display().to_string())),
        }
    }

    /// Borrow the underlying writer
    pub fn writer(&mut self) -> Result<&mut BufWriter<File>> {
        let path = &self.path;
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Closed(path.display().to_string()))
    }

    /// Flush and release the file. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            debug!(path = %self.path.display(), "closed changelog file");
        }
        Ok(())
    }
}
