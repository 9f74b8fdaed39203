//! Media type detection by file extension.

use std::path::Path;

use vidpush_protocol::constants::DEFAULT_CONTENT_TYPE;

/// Detects the media type of a video file from its extension.
///
/// Unknown or missing extensions fall back to `application/octet-stream`,
/// which the upload API accepts and sniffs server-side.
pub fn detect_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov" | "qt") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        Some("flv") => "video/x-flv",
        Some("wmv") => "video/x-ms-wmv",
        Some("mpeg" | "mpg") => "video/mpeg",
        Some("3gp") => "video/3gpp",
        Some("ts") => "video/mp2t",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
