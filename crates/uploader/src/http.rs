//! `reqwest`-backed transport.

use std::time::Duration;

use reqwest::header::{CONTENT_RANGE, CONTENT_TYPE, LOCATION};
use tracing::debug;
use vidpush_protocol::constants::{
    HEADER_UPLOAD_CONTENT_LENGTH, HEADER_UPLOAD_CONTENT_TYPE, NEGOTIATION_QUERY, REQUEST_TIMEOUT,
    UPLOAD_ENDPOINT,
};

use crate::error::UploadError;
use crate::transport::{
    ChunkRequest, ChunkResponse, SessionRequest, SessionResponse, TransportFuture,
    UploadTransport,
};

/// HTTP transport for the resumable upload API.
///
/// Redirects are disabled: the chunk endpoint answers `308` for every
/// accepted non-final chunk, which must reach the uploader untouched.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport pointing at the public upload endpoint.
    pub fn new() -> Result<Self, UploadError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("vidpush/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: UPLOAD_ENDPOINT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        })
    }

    /// Overrides the negotiation endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the negotiation request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Negotiation endpoint in use.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UploadTransport for HttpTransport {
    fn create_session<'a>(
        &'a self,
        request: &'a SessionRequest,
    ) -> TransportFuture<'a, SessionResponse> {
        Box::pin(async move {
            let resp = self
                .http
                .post(&self.endpoint)
                .query(NEGOTIATION_QUERY)
                .bearer_auth(&request.token)
                .header(
                    HEADER_UPLOAD_CONTENT_LENGTH,
                    request.content_length.to_string(),
                )
                .header(HEADER_UPLOAD_CONTENT_TYPE, request.content_type.as_str())
                .json(&request.resource)
                .timeout(self.request_timeout)
                .send()
                .await?;

            let status = resp.status().as_u16();
            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.text().await?;

            debug!(status, has_location = location.is_some(), "negotiation response");
            Ok(SessionResponse {
                status,
                location,
                body,
            })
        })
    }

    fn put_chunk<'a>(
        &'a self,
        session_url: &'a str,
        request: ChunkRequest,
    ) -> TransportFuture<'a, ChunkResponse> {
        Box::pin(async move {
            let resp = self
                .http
                .put(session_url)
                .header(CONTENT_TYPE, request.content_type.as_str())
                .header(HEADER_UPLOAD_CONTENT_TYPE, request.content_type.as_str())
                .header(CONTENT_RANGE, request.content_range.as_str())
                .body(request.data)
                .send()
                .await?;

            let status = resp.status().as_u16();
            let body = resp.bytes().await?.to_vec();
            Ok(ChunkResponse { status, body })
        })
    }
}
