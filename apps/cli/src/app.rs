//! Wires configuration, auth and transport into one upload run.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vidpush_protocol::{ProgressEvent, UploadedVideo, VideoMetadata};
use vidpush_transfer::SpeedCalculator;
use vidpush_uploader::{EnvToken, HttpTransport, Uploader, prepare_target};

use crate::cli::Args;
use crate::config::Config;

/// Uploads the file named on the command line.
pub async fn run(args: Args, config: Config) -> anyhow::Result<UploadedVideo> {
    let metadata = VideoMetadata {
        title: args.resolved_title(),
        description: args.description.clone(),
        privacy_status: args.privacy.unwrap_or(config.default_privacy),
    };
    let target = prepare_target(&args.file, metadata)?;

    let token_env = args.token_env.as_deref().unwrap_or(&config.token_env);
    let auth = EnvToken::new(token_env);
    let transport = HttpTransport::new()?
        .with_endpoint(config.endpoint.as_str())
        .with_request_timeout(config.request_timeout());
    tracing::debug!(endpoint = transport.endpoint(), token_env, "transport ready");

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling upload");
            interrupt.cancel();
        }
    });

    let uploader = Uploader::new(&transport, &auth)
        .with_cancel(cancel)
        .with_chunk_timeout(config.chunk_timeout());

    let mut reporter = ProgressReporter::default();
    let video = uploader
        .upload(&target, &mut |event| reporter.report(&event))
        .await?;

    tracing::info!(video_id = %video.id, "video uploaded");
    Ok(video)
}

/// Logs one line per chunk with rate and ETA.
#[derive(Debug, Default)]
struct ProgressReporter {
    speed: SpeedCalculator,
}

impl ProgressReporter {
    fn report(&mut self, event: &ProgressEvent) {
        self.speed.observe(event);
        let remaining = event.total_bytes.saturating_sub(event.bytes_uploaded);
        let eta = self
            .speed
            .eta(remaining)
            .map(format_duration)
            .unwrap_or_else(|| "--".into());

        tracing::info!(
            "{:>5.1}%  {} / {}  {}/s  eta {}",
            event.fraction() * 100.0,
            format_bytes(event.bytes_uploaded),
            format_bytes(event.total_bytes),
            format_bytes(self.speed.bytes_per_second() as u64),
            eta,
        );
    }
}

/// Formats a byte count with binary units.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Formats a duration as `MmSSs`, or `Ss` below a minute.
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m{:02}s", secs / 60, secs % 60)
    }
}
