//! Construction settings for diagnostic log files.

use crate::error::{Error, Result};
use crate::handle::LogHandle;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Settings used to decide whether, and where, a log file is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    verbosity: i32,
    threshold: i32,
    dir: PathBuf,
    prefix: String,
}

impl LogConfig {
    /// Verbosity at which log files start being created.
    pub const DEFAULT_THRESHOLD: i32 = 2;

    /// File name prefix used unless overridden.
    pub const DEFAULT_PREFIX: &'static str = "blow_";

    /// Config for the given verbosity, logging into the current directory.
    pub fn new(verbosity: i32) -> Self {
        Self {
            verbosity,
            threshold: Self::DEFAULT_THRESHOLD,
            dir: PathBuf::from("."),
            prefix: Self::DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the verbosity is high enough for a log file.
    pub fn is_enabled(&self) -> bool {
        self.verbosity >= self.threshold
    }

    /// File name prefix for a log created at `now`: `<prefix><YYYYMMDDHHMMSS>_`.
    pub fn file_prefix(&self, now: DateTime<Local>) -> String {
        format!("{}{}_", self.prefix, now.format("%Y%m%d%H%M%S"))
    }

    /// Create the log file and its handle.
    ///
    /// Returns `Ok(None)` without touching the filesystem when logging is not
    /// enabled. On success the file path is printed to stdout.
    pub fn open(&self) -> Result<Option<LogHandle>> {
        if !self.is_enabled() {
            tracing::debug!(
                verbosity = self.verbosity,
                threshold = self.threshold,
                "log file disabled"
            );
            return Ok(None);
        }

        let (file, path) = self.create_file()?;
        println!("Log details to: {}", path.display());
        tracing::debug!(path = %path.display(), "log file created");

        Ok(Some(LogHandle::from_parts(file, path)))
    }

    /// Exclusively create a uniquely named, persistent file in `dir`.
    fn create_file(&self) -> Result<(std::fs::File, PathBuf)> {
        let create_error = |source| Error::Create {
            dir: self.dir.display().to_string(),
            source,
        };

        let named = tempfile::Builder::new()
            .prefix(&self.file_prefix(Local::now()))
            .suffix(".log")
            .tempfile_in(&self.dir)
            .map_err(create_error)?;

        named.keep().map_err(|e| create_error(e.error))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
