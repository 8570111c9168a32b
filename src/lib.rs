//! A thread-safe diagnostic log that hands back everything written since the
//! last checkpoint.
//!
//! Callers append text or bytes to a single file, mark a position, and later
//! read only what was appended after the mark. Logging is opt-in: a handle is
//! only created when the verbosity reaches a threshold.
//!
//! # Example
//!
//! ```rust,no_run
//! use checkpoint_log::LogHandle;
//!
//! fn main() -> Result<(), checkpoint_log::Error> {
//!     let Some(log) = LogHandle::create(2)? else {
//!         return Ok(());
//!     };
//!
//!     log.append("setup noise\n");
//!     log.mark_position();
//!     log.append("step output\n");
//!
//!     assert_eq!(log.read_since_checkpoint(), "step output\n");
//!     log.close()
//! }
//! ```

// Internal modules - not part of public API
mod config;
mod error;
mod handle;
mod reader;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use config::LogConfig;
pub use error::{Error, Result};
pub use handle::LogHandle;
pub use reader::{read_tail, read_tail_with_len};
