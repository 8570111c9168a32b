//! Error types for the checkpoint log library.

use thiserror::Error;

/// The main error type for checkpoint log operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors when writing or flushing the log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing log file could not be created.
    #[error("Failed to create log file in {dir}: {source}")]
    Create {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    /// Seeking to the requested offset failed.
    #[error("Failed to seek to offset {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// A read failed before end of file. `partial` holds the bytes read so far.
    #[error("Read failed after {} bytes: {source}", .partial.len())]
    Read {
        partial: Vec<u8>,
        #[source]
        source: std::io::Error,
    },

    /// The log handle has already been closed.
    #[error("Log file already closed")]
    Closed,
}

/// A convenient Result type for checkpoint log operations.
pub type Result<T> = std::result::Result<T, Error>;
