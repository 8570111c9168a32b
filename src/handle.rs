//! The shared diagnostic log handle.

use crate::config::LogConfig;
use crate::error::{Error, Result};
use crate::reader::read_tail;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An append-only log file with a movable checkpoint.
///
/// All operations take one lock for their full duration, so a seek followed
/// by a read or write is never interleaved with another caller's I/O. Share
/// the handle between threads with an `Arc`.
#[derive(Debug)]
pub struct LogHandle {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// `None` once the handle has been closed.
    file: Option<File>,
    checkpoint: u64,
}

impl LogHandle {
    /// Create a log file in the current directory if `verbosity` is at least
    /// [`LogConfig::DEFAULT_THRESHOLD`].
    ///
    /// A creation failure is returned as [`Error::Create`]; hosts are expected
    /// to treat it as a startup failure.
    pub fn create(verbosity: i32) -> Result<Option<Self>> {
        LogConfig::new(verbosity).open()
    }

    pub(crate) fn from_parts(file: File, path: PathBuf) -> Self {
        Self {
            path,
            inner: Mutex::new(Inner {
                file: Some(file),
                checkpoint: 0,
            }),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append text at the current position. Write errors are logged, not returned.
    pub fn append(&self, text: &str) {
        self.append_bytes(text.as_bytes());
    }

    /// Append raw bytes at the current position. Write errors are logged, not returned.
    pub fn append_bytes(&self, bytes: &[u8]) {
        let mut inner = self.inner.lock();
        let Some(file) = inner.file.as_mut() else {
            tracing::warn!(path = %self.path.display(), "append after close dropped");
            return;
        };

        if let Err(e) = file.write_all(bytes) {
            tracing::warn!(path = %self.path.display(), error = %e, "log append failed");
        }
    }

    /// Write out and empty an in-memory buffer.
    pub fn append_buffer(&self, buf: &mut Vec<u8>) {
        self.append_bytes(buf);
        buf.clear();
    }

    /// Move the checkpoint to the current end of what has been written.
    pub fn mark_position(&self) {
        let mut inner = self.inner.lock();
        let Some(file) = inner.file.as_mut() else {
            return;
        };

        match file.stream_position() {
            Ok(pos) => {
                inner.checkpoint = pos;
                tracing::debug!(checkpoint = pos, "log position marked");
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "log mark failed");
            }
        }
    }

    /// Offset recorded by the last [`mark_position`](Self::mark_position).
    pub fn checkpoint(&self) -> u64 {
        self.inner.lock().checkpoint
    }

    /// Everything written since the last checkpoint, decoded as UTF-8 (lossily).
    ///
    /// Never fails: a seek error yields an empty string and a read error
    /// yields whatever was read before it. Both are logged. No tag filtering
    /// happens here; see [`read_since_tag`](Self::read_since_tag) for that.
    pub fn read_since_checkpoint(&self) -> String {
        let data = best_effort(self.try_read_since_checkpoint(), &self.path);
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Raw bytes written since the last checkpoint, with errors surfaced.
    pub fn try_read_since_checkpoint(&self) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock();
        let checkpoint = inner.checkpoint;
        let file = inner.file.as_mut().ok_or(Error::Closed)?;

        let result = read_tail(file, checkpoint);
        // Reading leaves the cursor at EOF, which is also where appends go.
        // Seek anyway in case the tail read stopped short.
        if let Err(e) = file.seek(SeekFrom::End(0)) {
            tracing::warn!(path = %self.path.display(), error = %e, "log cursor reset failed");
        }
        result
    }

    /// Text after the last occurrence of `tag` in the whole file, prefixed with
    /// a newline and the tag itself.
    ///
    /// Returns an empty string if the tag is empty, never occurs, or the file
    /// can't be read.
    pub fn read_since_tag(&self, tag: &str) -> String {
        if tag.is_empty() {
            return String::new();
        }

        let mut inner = self.inner.lock();
        let Some(file) = inner.file.as_mut() else {
            return String::new();
        };

        let data = read_tail(file, 0);
        if let Err(e) = file.seek(SeekFrom::End(0)) {
            tracing::warn!(path = %self.path.display(), error = %e, "log cursor reset failed");
        }
        let data = match data {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "log read failed");
                return String::new();
            }
        };

        match rfind(&data, tag.as_bytes()) {
            Some(at) => {
                let rest = String::from_utf8_lossy(&data[at + tag.len()..]);
                format!("\n{}{}", tag, rest)
            }
            None => String::new(),
        }
    }

    /// Flush the file to disk and release it.
    ///
    /// Returns [`Error::Closed`] if the handle was already closed. Later
    /// appends are dropped and reads return nothing.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let file = inner.file.take().ok_or(Error::Closed)?;
        file.sync_all()?;
        tracing::debug!(path = %self.path.display(), "log file closed");
        Ok(())
    }
}

/// Bytes to hand back when a read must not fail: partial data on a read
/// error, nothing on any other error.
fn best_effort(result: Result<Vec<u8>>, path: &Path) -> Vec<u8> {
    match result {
        Ok(data) => data,
        Err(Error::Read { partial, source }) => {
            tracing::warn!(path = %path.display(), error = %source, "log read truncated");
            partial
        }
        Err(Error::Closed) => Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "log read failed");
            Vec::new()
        }
    }
}

/// Position of the last occurrence of `needle` in `haystack`.
fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
