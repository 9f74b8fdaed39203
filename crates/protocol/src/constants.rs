use std::time::Duration;

/// Fixed chunk size for every non-final chunk (256 KiB).
///
/// The upload API only accepts non-final chunks whose length is a multiple
/// of 256 KiB, so the client never negotiates or adapts this value.
pub const MAX_CHUNK_BYTES: usize = 262_144;

/// Resumable upload endpoint for video resources.
pub const UPLOAD_ENDPOINT: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

/// Query parameters sent with the session negotiation request.
///
/// `part` selects the response fields, `mine` scopes the call to the
/// authenticated channel and `uploadType` selects the resumable protocol.
pub const NEGOTIATION_QUERY: &[(&str, &str)] = &[
    ("part", "snippet,status"),
    ("mine", "true"),
    ("uploadType", "resumable"),
];

/// Declared total size of the media, sent on negotiation.
pub const HEADER_UPLOAD_CONTENT_LENGTH: &str = "X-Upload-Content-Length";

/// Declared media type, sent on negotiation and on every chunk.
pub const HEADER_UPLOAD_CONTENT_TYPE: &str = "X-Upload-Content-Type";

/// Status returned for an accepted non-final chunk ("Resume Incomplete").
pub const STATUS_RESUME_INCOMPLETE: u16 = 308;

/// Statuses returned once the final chunk is accepted.
pub const STATUS_COMPLETE: &[u16] = &[200, 201];

/// Timeout for the negotiation request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a single chunk PUT.
///
/// Chunks are small, but the final chunk response is only sent once the
/// server has finished creating the resource, which can take a while.
pub const CHUNK_TIMEOUT: Duration = Duration::from_secs(120);

/// Fallback media type when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Formats the `Content-Range` header value for a chunk.
///
/// A zero-length upload uses the unsatisfied-range form `bytes */0`
/// because `bytes 0--1/0` is not a valid range.
pub fn content_range(offset: u64, len: u64, total: u64) -> String {
    if len == 0 {
        format!("bytes */{total}")
    } else {
        format!("bytes {offset}-{}/{total}", offset + len - 1)
    }
}
