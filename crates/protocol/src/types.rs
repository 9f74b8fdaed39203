use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visibility of the uploaded video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyStatus {
    #[default]
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "unlisted")]
    Unlisted,
}

impl PrivacyStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Private => "private",
            PrivacyStatus::Public => "public",
            PrivacyStatus::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown privacy status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown privacy status {0:?} (expected private, public or unlisted)")]
pub struct ParsePrivacyError(pub String);

impl FromStr for PrivacyStatus {
    type Err = ParsePrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(PrivacyStatus::Private),
            "public" => Ok(PrivacyStatus::Public),
            "unlisted" => Ok(PrivacyStatus::Unlisted),
            _ => Err(ParsePrivacyError(s.to_string())),
        }
    }
}

/// User-facing metadata of the video resource to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub privacy_status: PrivacyStatus,
}

/// Immutable description of a local file and the resource it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    path: PathBuf,
    size: u64,
    content_type: String,
    metadata: VideoMetadata,
}

impl UploadTarget {
    /// Creates a target. `size` is the declared byte length sent to the server.
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        content_type: impl Into<String>,
        metadata: VideoMetadata,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            content_type: content_type.into(),
            metadata,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }
}

/// Snapshot emitted once per transmitted chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub bytes_uploaded: u64,
    pub total_bytes: u64,
}

impl ProgressEvent {
    /// Completion ratio in `[0.0, 1.0]`. An empty upload counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        self.bytes_uploaded as f64 / self.total_bytes as f64
    }
}
