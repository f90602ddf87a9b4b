//! The open log file owned by the file printer worker

use crate::core::{LoggerError, Result, LINE_SEPARATOR};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub(crate) struct LogWriter {
    file_name: String,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogWriter {
    /// Open `folder/file_name` for appending, creating it if needed.
    pub(crate) fn open(folder: &Path, file_name: &str) -> Result<Self> {
        let path = folder.join(file_name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("Cannot open {}", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            file_name: file_name.to_string(),
            path,
            writer: BufWriter::new(file),
        })
    }

    pub(crate) fn file_name(&self) -> &str {
        &self.file_name
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` plus a line terminator and flush to disk.
    pub(crate) fn append_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(LINE_SEPARATOR.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| {
            LoggerError::file_printer(self.path.display().to_string(), format!("Flush failed: {}", e))
        })
    }

    /// Flush and release the file handle.
    pub(crate) fn close(mut self) -> Result<()> {
        self.flush()
    }
}
