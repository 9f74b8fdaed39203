//! Network seam between the upload state machine and HTTP.
//!
//! `UploadTransport` is implemented by [`HttpTransport`](crate::HttpTransport).
//! Keeping the state machine behind a trait keeps it decoupled from
//! `reqwest` and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use vidpush_protocol::VideoResource;

use crate::error::UploadError;

/// Boxed future returned by transport calls.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, UploadError>> + Send + 'a>>;

/// Everything the negotiation request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// JSON body describing the video to create.
    pub resource: VideoResource,
    /// Declared total size (`X-Upload-Content-Length`).
    pub content_length: u64,
    /// Declared media type (`X-Upload-Content-Type`).
    pub content_type: String,
}

/// Raw negotiation response. Interpretation is up to the negotiator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: u16,
    /// Value of the `Location` header, if present.
    pub location: Option<String>,
    pub body: String,
}

/// One chunk PUT to the session URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    /// Sent as both `Content-Type` and `X-Upload-Content-Type`.
    pub content_type: String,
    /// `Content-Range` header value.
    pub content_range: String,
    pub data: Vec<u8>,
}

/// Raw chunk response. Interpretation is up to the uploader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport used by the negotiator and the chunked uploader.
pub trait UploadTransport: Send + Sync {
    /// Sends the authenticated negotiation request.
    fn create_session<'a>(
        &'a self,
        request: &'a SessionRequest,
    ) -> TransportFuture<'a, SessionResponse>;

    /// Sends one unauthenticated chunk to the session URL.
    fn put_chunk<'a>(
        &'a self,
        session_url: &'a str,
        request: ChunkRequest,
    ) -> TransportFuture<'a, ChunkResponse>;
}
