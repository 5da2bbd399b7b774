//! Append-only file sink

use crate::core::{LoggerError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends event lines to a file
///
/// Each write holds an exclusive advisory lock on the file, so lines from
/// several processes sharing the file do not interleave. Nothing is
/// buffered in user space.
///
/// # Examples
///
/// ```no_run
/// use rust_json_logger::prelude::*;
///
/// let sink = FileSink::open("/var/log/app.jsonl").unwrap();
/// let logger = Logger::new(sink, Fields::new());
/// logger.info("written to /var/log/app.jsonl");
/// ```
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        FileExt::lock_exclusive(&self.file)?;
        let result = self.file.write_all(buf);
        let unlocked = FileExt::unlock(&self.file);
        result.and(unlocked).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
