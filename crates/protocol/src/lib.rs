pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use constants::MAX_CHUNK_BYTES;
pub use messages::{UploadedVideo, VideoResource, VideoSnippet, VideoStatus};
pub use types::{
    ParsePrivacyError, PrivacyStatus, ProgressEvent, UploadTarget, VideoMetadata,
};
