use std::io::Read;
use std::path::Path;

use tracing::trace;
use vidpush_protocol::MAX_CHUNK_BYTES;

use crate::TransferError;
use crate::types::Chunk;

/// Reads a file front to back in fixed-size chunks.
///
/// The reader is the upload cursor: `offset` is the number of bytes handed
/// out so far and never exceeds the declared total size. A chunk is only
/// returned if exactly the requested number of bytes could be read, so a
/// file that shrank after the upload was negotiated surfaces as
/// [`TransferError::ShortRead`] instead of a truncated range.
///
/// The file handle is closed when the reader is dropped.
#[derive(Debug)]
pub struct ChunkReader {
    file: std::fs::File,
    chunk_size: usize,
    offset: u64,
    total_size: u64,
    emitted: bool,
}

impl ChunkReader {
    /// Opens `path` for chunked reading of `total_size` declared bytes.
    ///
    /// If `chunk_size` is 0, [`MAX_CHUNK_BYTES`] is used.
    pub fn open(path: &Path, total_size: u64, chunk_size: usize) -> Result<Self, TransferError> {
        let file = std::fs::File::open(path)?;
        let chunk_size = if chunk_size == 0 {
            MAX_CHUNK_BYTES
        } else {
            chunk_size
        };
        Ok(Self {
            file,
            chunk_size,
            offset: 0,
            total_size,
            emitted: false,
        })
    }

    /// Reads the next chunk. Returns `None` once the whole file was handed out.
    ///
    /// An empty file yields exactly one empty chunk so the upload still
    /// gets a terminating request.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, TransferError> {
        let remaining = self.remaining();
        if remaining == 0 && self.emitted {
            return Ok(None);
        }

        let expected = remaining.min(self.chunk_size as u64) as usize;
        let mut buf = vec![0u8; expected];
        let actual = read_full(&mut self.file, &mut buf)?;
        if actual != expected {
            return Err(TransferError::ShortRead {
                offset: self.offset,
                expected,
                actual,
            });
        }

        let chunk = Chunk {
            offset: self.offset,
            total_size: self.total_size,
            data: buf,
        };
        self.offset += expected as u64;
        self.emitted = true;
        trace!(offset = chunk.offset, len = expected, "read chunk");
        Ok(Some(chunk))
    }

    /// Bytes handed out so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.total_size - self.offset
    }

    /// Whether every byte has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.emitted && self.remaining() == 0
    }

    /// Number of chunks a file of `total_size` bytes is split into.
    pub fn chunk_count(total_size: u64, chunk_size: usize) -> u64 {
        total_size.div_ceil(chunk_size as u64).max(1)
    }
}

/// Fills `buf` from `reader`, stopping early only at EOF.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
