use std::io::ErrorKind;

use fdline_source::{ChunkSource, Descriptor};
use tracing::{debug, trace, warn};

use crate::error::{LineError, Result};
use crate::line::{Line, NextLine};

/// Result of scanning one descriptor for its next line.
#[derive(Debug)]
pub(crate) struct Scanned {
    pub(crate) next: NextLine,
    /// Bytes past the returned line, to be carried into the next call.
    pub(crate) carry: Option<Vec<u8>>,
}

/// Index of the first newline in `bytes`.
pub(crate) fn find_newline(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == b'\n')
}

/// Read from `fd` in `chunk_size` pieces, starting from `pending`, until a
/// line is complete or the stream ends.
///
/// No I/O happens when `pending` already holds a newline. On error every
/// buffer owned by this call, `pending` included, is dropped.
pub(crate) fn scan_line<R: ChunkSource + ?Sized>(
    source: &mut R,
    fd: Descriptor,
    chunk_size: usize,
    mut pending: Vec<u8>,
) -> Result<Scanned> {
    if let Some(idx) = find_newline(&pending) {
        return split_at_newline(pending, idx);
    }

    let mut chunk = stage_chunk(chunk_size)?;
    loop {
        let n = match source.read_chunk(fd, &mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(%fd, error = %err, discarded = pending.len(), "read failed");
                return Err(LineError::Io(err));
            }
        };

        if n == 0 {
            break;
        }

        let searched = pending.len();
        grow(&mut pending, n)?;
        pending.extend_from_slice(&chunk[..n]);
        trace!(%fd, read = n, buffered = pending.len(), "appended chunk");

        if let Some(idx) = find_newline(&pending[searched..]) {
            return split_at_newline(pending, searched + idx);
        }
    }

    if pending.is_empty() {
        debug!(%fd, "end of stream");
        return Ok(Scanned {
            next: NextLine::EndOfStream,
            carry: None,
        });
    }

    debug!(%fd, len = pending.len(), "end of stream with unterminated line");
    Ok(Scanned {
        next: NextLine::Line(Line::from(pending)),
        carry: None,
    })
}

/// Split `buf` after the newline at `idx`.
fn split_at_newline(buf: Vec<u8>, idx: usize) -> Result<Scanned> {
    let rest = &buf[idx + 1..];
    let carry = if rest.is_empty() {
        None
    } else {
        let mut carry = Vec::new();
        carry
            .try_reserve_exact(rest.len())
            .map_err(|_| LineError::Allocation {
                requested: rest.len(),
            })?;
        carry.extend_from_slice(rest);
        Some(carry)
    };

    let line = release_tail(buf, idx + 1);
    debug!(len = line.len(), carried = carry.as_ref().map_or(0, Vec::len), "line ready");
    Ok(Scanned {
        next: NextLine::Line(Line::from(line)),
        carry,
    })
}

/// Cut `buf` to `len` bytes. Spare capacity is handed back when it
/// dominates, since the line keeps its allocation alive.
fn release_tail(mut buf: Vec<u8>, len: usize) -> Vec<u8> {
    buf.truncate(len);
    if buf.capacity() / 2 > buf.len() {
        buf.shrink_to_fit();
    }
    buf
}

fn stage_chunk(chunk_size: usize) -> Result<Vec<u8>> {
    let mut chunk = Vec::new();
    chunk
        .try_reserve_exact(chunk_size)
        .map_err(|_| LineError::Allocation {
            requested: chunk_size,
        })?;
    chunk.resize(chunk_size, 0);
    Ok(chunk)
}

fn grow(buf: &mut Vec<u8>, additional: usize) -> Result<()> {
    buf.try_reserve(additional)
        .map_err(|_| LineError::Allocation {
            requested: buf.len().saturating_add(additional),
        })
}
