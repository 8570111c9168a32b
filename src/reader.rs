//! Tail reading for files whose reported size can't be trusted.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Smallest initial read buffer.
///
/// Files in Linux's /proc claim size 0 but misbehave when read in small
/// pieces, so the first read always asks for at least this much.
pub(crate) const MIN_READ_SIZE: usize = 512;

/// Largest first read buffer. Reported sizes are only a hint; anything
/// beyond this is read by growing the buffer.
pub(crate) const MAX_INITIAL_READ_SIZE: usize = 1 << 20;

/// Read everything from `from` to the current end of `file`.
///
/// The size reported by the file's metadata is only used to size the first
/// buffer; reading continues until the file reports end of file. An offset
/// past the end yields an empty result.
pub fn read_tail(file: &mut File, from: u64) -> Result<Vec<u8>> {
    let reported_len = file.metadata().map(|m| m.len()).unwrap_or(0);
    read_tail_with_len(file, reported_len, from)
}

/// Like [`read_tail`], for any seekable reader whose length is known (or
/// guessed) separately.
pub fn read_tail_with_len<R: Read + Seek>(
    reader: &mut R,
    reported_len: u64,
    from: u64,
) -> Result<Vec<u8>> {
    reader
        .seek(SeekFrom::Start(from))
        .map_err(|source| Error::Seek {
            offset: from,
            source,
        })?;

    let mut data = vec![0u8; initial_capacity(reported_len, from)];
    let mut filled = 0;

    loop {
        if filled == data.len() {
            grow_buffer(&mut data);
        }

        match reader.read(&mut data[filled..]) {
            Ok(0) => {
                data.truncate(filled);
                return Ok(data);
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                data.truncate(filled);
                return Err(Error::Read {
                    partial: data,
                    source,
                });
            }
        }
    }
}

/// Size of the first read buffer: the remaining bytes plus one for the final
/// read at EOF, clamped to [`MIN_READ_SIZE`]..=[`MAX_INITIAL_READ_SIZE`].
fn initial_capacity(reported_len: u64, from: u64) -> usize {
    let remaining = reported_len.saturating_sub(from).saturating_add(1);
    usize::try_from(remaining)
        .unwrap_or(usize::MAX)
        .clamp(MIN_READ_SIZE, MAX_INITIAL_READ_SIZE)
}

/// Double the buffer, keeping everything already read.
fn grow_buffer(data: &mut Vec<u8>) {
    let new_len = data.len().saturating_mul(2).max(MIN_READ_SIZE);
    data.resize(new_len, 0);
}
