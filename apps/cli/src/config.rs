//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/vidpush/config.toml`
//! - Windows: `%APPDATA%/vidpush/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vidpush_protocol::PrivacyStatus;
use vidpush_protocol::constants::{CHUNK_TIMEOUT, REQUEST_TIMEOUT, UPLOAD_ENDPOINT};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Resumable upload endpoint used for session negotiation.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the OAuth bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Negotiation request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Per-chunk timeout in seconds (0 = no timeout).
    #[serde(default = "default_chunk_timeout")]
    pub chunk_timeout_secs: u64,

    /// Visibility used when `--privacy` is not given.
    #[serde(default)]
    pub default_privacy: PrivacyStatus,
}

fn default_endpoint() -> String {
    UPLOAD_ENDPOINT.into()
}

fn default_token_env() -> String {
    "VIDPUSH_TOKEN".into()
}

fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

fn default_chunk_timeout() -> u64 {
    CHUNK_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token_env: default_token_env(),
            request_timeout_secs: default_request_timeout(),
            chunk_timeout_secs: default_chunk_timeout(),
            default_privacy: PrivacyStatus::default(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Per-chunk timeout, `None` when disabled.
    pub fn chunk_timeout(&self) -> Option<Duration> {
        (self.chunk_timeout_secs > 0).then(|| Duration::from_secs(self.chunk_timeout_secs))
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("vidpush").join("config.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("vidpush")
            .join("config.toml"))
    }
}
