//! Resumable video upload: session negotiation and chunked transmission.
//!
//! The flow has two phases. The [`Negotiator`] makes one authenticated
//! request describing the video and receives a single-use session URL.
//! The [`ChunkedUploader`] then streams the file to that URL in
//! 256 KiB chunks until the server reports the resource as created.
//!
//! Both phases talk to the network through [`UploadTransport`], which
//! [`HttpTransport`] implements with `reqwest`. Tests substitute a mock.

pub mod auth;
pub mod content_type;
pub mod error;
pub mod http;
pub mod negotiate;
pub mod session;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types for convenience.
pub use auth::{AuthError, AuthProvider, EnvToken, StaticToken};
pub use content_type::detect_content_type;
pub use error::UploadError;
pub use http::HttpTransport;
pub use negotiate::Negotiator;
pub use session::{ChunkResult, ChunkedUploader, UploadSession, UploadState};
pub use transport::{
    ChunkRequest, ChunkResponse, SessionRequest, SessionResponse, UploadTransport,
};
pub use upload::{Uploader, prepare_target};
