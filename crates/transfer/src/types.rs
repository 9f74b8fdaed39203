use vidpush_protocol::constants::content_range;

/// A contiguous byte range of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Byte offset of the first byte within the file.
    pub offset: u64,
    /// Declared total size of the file.
    pub total_size: u64,
    /// Raw chunk data.
    pub data: Vec<u8>,
}

impl Chunk {
    /// Number of bytes in this chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset just past the last byte of this chunk.
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Whether this chunk reaches the end of the file.
    pub fn is_last(&self) -> bool {
        self.end() == self.total_size
    }

    /// Value of the `Content-Range` header for this chunk.
    pub fn content_range(&self) -> String {
        content_range(self.offset, self.data.len() as u64, self.total_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_range_and_bounds() {
        let chunk = Chunk {
            offset: 10,
            total_size: 15,
            data: b"hello".to_vec(),
        };
        assert_eq!(chunk.len(), 5);
        assert_eq!(chunk.end(), 15);
        assert!(chunk.is_last());
        assert_eq!(chunk.content_range(), "bytes 10-14/15");
    }

    #[test]
    fn empty_chunk_range() {
        let chunk = Chunk {
            offset: 0,
            total_size: 0,
            data: Vec::new(),
        };
        assert!(chunk.is_empty());
        assert!(chunk.is_last());
        assert_eq!(chunk.content_range(), "bytes */0");
    }
}
