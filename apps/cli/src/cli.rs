//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use vidpush_protocol::PrivacyStatus;

/// Upload a video through the resumable upload protocol.
#[derive(Debug, Parser)]
#[command(name = "vidpush", version, about)]
pub struct Args {
    /// Video file to upload.
    pub file: PathBuf,

    /// Video title (defaults to the file name without extension).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Video description.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Visibility: private, public or unlisted (defaults to the config value).
    #[arg(short, long)]
    pub privacy: Option<PrivacyStatus>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Environment variable holding the OAuth bearer token.
    #[arg(long)]
    pub token_env: Option<String>,
}

impl Args {
    /// Title to use, falling back to the file stem.
    pub fn resolved_title(&self) -> String {
        if let Some(title) = self.title.as_deref().map(str::trim)
            && !title.is_empty()
        {
            return title.to_string();
        }
        self.file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".into())
    }
}
