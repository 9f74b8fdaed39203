//! Sequential chunk reading with short-read detection and transfer rate tracking.

mod chunked;
mod progress;
mod types;
mod validation;

pub use chunked::ChunkReader;
pub use progress::SpeedCalculator;
pub use types::Chunk;
pub use validation::validate_source_file;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read at offset {offset}: expected {expected} bytes, got {actual}")]
    ShortRead {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    #[error("invalid source: {0}")]
    InvalidSource(String),
}
