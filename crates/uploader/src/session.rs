//! Chunked upload state machine.
//!
//! One [`ChunkedUploader`] drives one negotiated session:
//!
//! ```text
//! Ready ──run()──▶ Uploading ──200/201──▶ Complete
//!                    │  ▲
//!                    │  └─ 308
//!                    └──── error / cancel ──▶ Failed
//! ```
//!
//! Chunks are sent strictly in order; the next chunk is read only after
//! the previous response is known.

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vidpush_protocol::constants::{STATUS_COMPLETE, STATUS_RESUME_INCOMPLETE};
use vidpush_protocol::{MAX_CHUNK_BYTES, ProgressEvent, UploadedVideo};
use vidpush_transfer::{Chunk, ChunkReader};

use crate::error::UploadError;
use crate::transport::{ChunkRequest, ChunkResponse, UploadTransport};

/// A negotiated upload session.
///
/// The URL is a pre-authorized capability; it is used for every chunk
/// without a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadSession {
    url: String,
    total_size: u64,
    content_type: String,
}

impl UploadSession {
    pub fn new(url: impl Into<String>, total_size: u64, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            total_size,
            content_type: content_type.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl std::fmt::Debug for UploadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL grants write access; keep it out of logs.
        f.debug_struct("UploadSession")
            .field("total_size", &self.total_size)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a [`ChunkedUploader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Ready,
    Uploading,
    Complete,
    Failed,
}

/// Outcome of one chunk transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkResult {
    /// Chunk accepted, more data expected.
    Incomplete,
    /// Final chunk accepted, resource created.
    Complete(UploadedVideo),
}

impl ChunkResult {
    /// Maps a chunk response status onto the protocol outcome.
    pub fn from_response(response: ChunkResponse) -> Result<Self, UploadError> {
        match response.status {
            STATUS_RESUME_INCOMPLETE => Ok(ChunkResult::Incomplete),
            status if STATUS_COMPLETE.contains(&status) => {
                let video: UploadedVideo = serde_json::from_slice(&response.body)?;
                Ok(ChunkResult::Complete(video))
            }
            status => Err(UploadError::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }),
        }
    }
}

/// Streams a file to a negotiated session in fixed-size chunks.
pub struct ChunkedUploader<'a> {
    transport: &'a dyn UploadTransport,
    session: UploadSession,
    cancel: CancellationToken,
    chunk_timeout: Option<Duration>,
    chunk_size: usize,
    state: UploadState,
    offset: u64,
}

impl<'a> ChunkedUploader<'a> {
    pub fn new(
        transport: &'a dyn UploadTransport,
        session: UploadSession,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            transport,
            session,
            cancel,
            chunk_timeout: None,
            chunk_size: MAX_CHUNK_BYTES,
            state: UploadState::Ready,
            offset: 0,
        }
    }

    /// Bounds each chunk PUT. `None` waits indefinitely.
    pub fn with_chunk_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.chunk_timeout = timeout;
        self
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Bytes handed to the transport so far, including an in-flight chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    /// Uploads `path` and returns the created video.
    ///
    /// `on_progress` runs inline after every chunk response, before the
    /// status is inspected; a slow callback delays the next chunk. The
    /// file is closed on every exit path.
    pub async fn run(
        &mut self,
        path: &Path,
        on_progress: &mut (dyn FnMut(ProgressEvent) + Send),
    ) -> Result<UploadedVideo, UploadError> {
        if self.state != UploadState::Ready {
            return Err(UploadError::SessionSpent);
        }
        self.state = UploadState::Uploading;

        let result = self.upload_chunks(path, on_progress).await;
        self.state = match &result {
            Ok(_) => UploadState::Complete,
            Err(e) => {
                warn!(offset = self.offset, error = %e, "chunked upload failed");
                UploadState::Failed
            }
        };
        result
    }

    async fn upload_chunks(
        &mut self,
        path: &Path,
        on_progress: &mut (dyn FnMut(ProgressEvent) + Send),
    ) -> Result<UploadedVideo, UploadError> {
        let total = self.session.total_size();
        let mut reader = open_reader(path, total, self.chunk_size).await?;
        debug!(
            total_bytes = total,
            chunks = ChunkReader::chunk_count(total, self.chunk_size),
            "streaming chunks"
        );

        loop {
            self.check_cancelled()?;

            let (next_reader, chunk) = read_next(reader).await?;
            reader = next_reader;
            let Some(chunk) = chunk else {
                return Err(UploadError::RangeExhausted { total });
            };

            let content_range = chunk.content_range();
            // The cursor moves before the request; a failed PUT leaves it advanced.
            self.offset = chunk.end();
            debug!(
                range = %content_range,
                len = chunk.len(),
                last = chunk.is_last(),
                "sending chunk"
            );

            let response = self.send_chunk(chunk, content_range).await?;

            on_progress(ProgressEvent {
                bytes_uploaded: self.offset,
                total_bytes: total,
            });

            match ChunkResult::from_response(response)? {
                ChunkResult::Incomplete if reader.is_exhausted() => {
                    return Err(UploadError::RangeExhausted { total });
                }
                ChunkResult::Incomplete => continue,
                ChunkResult::Complete(video) => {
                    info!(video_id = %video.id, total_bytes = total, "upload complete");
                    return Ok(video);
                }
            }
        }
    }

    async fn send_chunk(
        &self,
        chunk: Chunk,
        content_range: String,
    ) -> Result<ChunkResponse, UploadError> {
        let request = ChunkRequest {
            content_type: self.session.content_type().to_string(),
            content_range,
            data: chunk.data,
        };

        let put = self.transport.put_chunk(self.session.url(), request);
        let put = async {
            match self.chunk_timeout {
                Some(limit) => match tokio::time::timeout(limit, put).await {
                    Ok(result) => result,
                    Err(_) => Err(UploadError::Timeout(limit)),
                },
                None => put.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(UploadError::Cancelled),
            result = put => result,
        }
    }

    fn check_cancelled(&self) -> Result<(), UploadError> {
        if self.cancel.is_cancelled() {
            Err(UploadError::Cancelled)
        } else {
            Ok(())
        }
    }
}

async fn open_reader(
    path: &Path,
    total: u64,
    chunk_size: usize,
) -> Result<ChunkReader, UploadError> {
    let path = path.to_path_buf();
    let reader = tokio::task::spawn_blocking(move || ChunkReader::open(&path, total, chunk_size))
        .await
        .map_err(|e| UploadError::Task(format!("open task failed: {e}")))??;
    Ok(reader)
}

/// Reads the next chunk on the blocking pool, handing the reader back.
async fn read_next(mut reader: ChunkReader) -> Result<(ChunkReader, Option<Chunk>), UploadError> {
    let (reader, chunk) = tokio::task::spawn_blocking(move || {
        let chunk = reader.next_chunk();
        (reader, chunk)
    })
    .await
    .map_err(|e| UploadError::Task(format!("read task failed: {e}")))?;
    Ok((reader, chunk?))
}
