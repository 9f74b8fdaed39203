use serde::{Deserialize, Serialize};

use crate::types::{PrivacyStatus, VideoMetadata};

/// Title and description of a video resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Visibility block of a video resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    #[serde(default)]
    pub privacy_status: PrivacyStatus,
}

/// JSON body of the session negotiation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResource {
    pub snippet: VideoSnippet,
    pub status: VideoStatus,
}

impl From<&VideoMetadata> for VideoResource {
    fn from(meta: &VideoMetadata) -> Self {
        Self {
            snippet: VideoSnippet {
                title: meta.title.clone(),
                description: meta.description.clone(),
            },
            status: VideoStatus {
                privacy_status: meta.privacy_status,
            },
        }
    }
}

/// Body of the final chunk response.
///
/// The server returns the full video resource; only the fields the client
/// reads are modelled, everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedVideo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,
}
