//! Scripted transport shared by the uploader tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::UploadError;
use crate::transport::{
    ChunkRequest, ChunkResponse, SessionRequest, SessionResponse, TransportFuture,
    UploadTransport,
};

pub(crate) const SESSION_URL: &str = "https://upload.example.com/session?upload_id=abc";

/// A chunk PUT as the mock saw it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedChunk {
    pub url: String,
    pub content_type: String,
    pub content_range: String,
    pub len: usize,
}

/// What the mock answers to a chunk PUT.
pub(crate) enum Reply {
    Status(u16),
    Final(u16, &'static str),
    Fail,
    Hang,
}

pub(crate) struct MockTransport {
    session: Mutex<Option<Result<SessionResponse, UploadError>>>,
    replies: Mutex<VecDeque<Reply>>,
    hang_session: bool,
    pub sessions: Mutex<Vec<SessionRequest>>,
    pub chunks: Mutex<Vec<RecordedChunk>>,
}

impl MockTransport {
    /// Negotiation succeeds with [`SESSION_URL`]; chunks get `replies` in order.
    pub fn new(replies: Vec<Reply>) -> Self {
        Self::with_session(
            Ok(SessionResponse {
                status: 200,
                location: Some(SESSION_URL.into()),
                body: String::new(),
            }),
            replies,
        )
    }

    pub fn with_session(
        session: Result<SessionResponse, UploadError>,
        replies: Vec<Reply>,
    ) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            replies: Mutex::new(replies.into()),
            hang_session: false,
            sessions: Mutex::new(Vec::new()),
            chunks: Mutex::new(Vec::new()),
        }
    }

    /// Negotiation never answers.
    pub fn hanging_session() -> Self {
        Self {
            hang_session: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn chunk_calls(&self) -> usize {
        self.chunks.lock().unwrap().len()
    }

    pub fn ranges(&self) -> Vec<String> {
        self.chunks
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.content_range.clone())
            .collect()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.chunks.lock().unwrap().iter().map(|c| c.len).collect()
    }
}

impl UploadTransport for MockTransport {
    fn create_session<'a>(
        &'a self,
        request: &'a SessionRequest,
    ) -> TransportFuture<'a, SessionResponse> {
        Box::pin(async move {
            self.sessions.lock().unwrap().push(request.clone());
            if self.hang_session {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.session
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(UploadError::Task("session already negotiated".into())))
        })
    }

    fn put_chunk<'a>(
        &'a self,
        session_url: &'a str,
        request: ChunkRequest,
    ) -> TransportFuture<'a, ChunkResponse> {
        Box::pin(async move {
            self.chunks.lock().unwrap().push(RecordedChunk {
                url: session_url.to_string(),
                content_type: request.content_type.clone(),
                content_range: request.content_range.clone(),
                len: request.data.len(),
            });
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Status(status)) => Ok(ChunkResponse {
                    status,
                    body: Vec::new(),
                }),
                Some(Reply::Final(status, body)) => Ok(ChunkResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                Some(Reply::Fail) => Err(UploadError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                ))),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(ChunkResponse::default())
                }
                None => Ok(ChunkResponse {
                    status: 500,
                    body: b"no scripted reply".to_vec(),
                }),
            }
        })
    }
}

/// Writes `size` bytes of patterned data to `dir/name`.
pub(crate) fn write_file(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, data).unwrap();
    path
}
