//! End-to-end upload: negotiate once, then stream chunks.

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use vidpush_protocol::constants::CHUNK_TIMEOUT;
use vidpush_protocol::{ProgressEvent, UploadTarget, UploadedVideo, VideoMetadata};
use vidpush_transfer::validate_source_file;

use crate::auth::AuthProvider;
use crate::content_type::detect_content_type;
use crate::error::UploadError;
use crate::negotiate::Negotiator;
use crate::session::ChunkedUploader;
use crate::transport::UploadTransport;

/// Builds an [`UploadTarget`] from a file on disk.
///
/// The declared size is the file size right now; if the file shrinks
/// before the upload finishes, the upload fails with a short read.
pub fn prepare_target(path: &Path, metadata: VideoMetadata) -> Result<UploadTarget, UploadError> {
    let size = validate_source_file(path)?;
    let content_type = detect_content_type(path);
    Ok(UploadTarget::new(path, size, content_type, metadata))
}

/// Runs the two-phase upload against a transport.
pub struct Uploader<'a> {
    transport: &'a dyn UploadTransport,
    auth: &'a dyn AuthProvider,
    cancel: CancellationToken,
    chunk_timeout: Option<Duration>,
}

impl<'a> Uploader<'a> {
    pub fn new(transport: &'a dyn UploadTransport, auth: &'a dyn AuthProvider) -> Self {
        Self {
            transport,
            auth,
            cancel: CancellationToken::new(),
            chunk_timeout: Some(CHUNK_TIMEOUT),
        }
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Overrides the per-chunk timeout (default 120 s). `None` disables it.
    pub fn with_chunk_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.chunk_timeout = timeout;
        self
    }

    /// Returns a token that cancels this upload between or during chunks.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Uploads `target` and returns the created video.
    ///
    /// Negotiation happens once; any failure ends the upload without retry.
    pub async fn upload(
        &self,
        target: &UploadTarget,
        on_progress: &mut (dyn FnMut(ProgressEvent) + Send),
    ) -> Result<UploadedVideo, UploadError> {
        if self.cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        info!(
            path = %target.path().display(),
            total_bytes = target.size(),
            content_type = %target.content_type(),
            "starting upload"
        );

        let negotiator = Negotiator::new(self.transport, self.auth);
        let session = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(UploadError::Cancelled),
            result = negotiator.negotiate(target) => {
                result.inspect_err(|e| error!(error = %e, "negotiation failed"))?
            }
        };

        let mut uploader = ChunkedUploader::new(self.transport, session, self.cancel.clone())
            .with_chunk_timeout(self.chunk_timeout);
        uploader.run(target.path(), on_progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::testing::{MockTransport, Reply, write_file};
    use crate::transport::SessionResponse;
    use tempfile::TempDir;
    use vidpush_protocol::PrivacyStatus;

    const DONE: &str = r#"{"id":"vid-600k","snippet":{"title":"Clip","description":""}}"#;

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Clip".into(),
            description: String::new(),
            privacy_status: PrivacyStatus::Unlisted,
        }
    }

    #[test]
    fn prepare_target_reads_size_and_type() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.MOV", 1234);
        let target = prepare_target(&path, metadata()).unwrap();
        assert_eq!(target.size(), 1234);
        assert_eq!(target.content_type(), "video/quicktime");
        assert_eq!(target.metadata().privacy_status, PrivacyStatus::Unlisted);
    }

    #[test]
    fn prepare_target_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = prepare_target(dir.path(), metadata()).unwrap_err();
        assert!(matches!(err, UploadError::Transfer(_)));
    }

    #[tokio::test]
    async fn end_to_end_600000_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.mp4", 600_000);
        let target = prepare_target(&path, metadata()).unwrap();
        let transport = MockTransport::new(vec![
            Reply::Status(308),
            Reply::Status(308),
            Reply::Final(200, DONE),
        ]);
        let auth = StaticToken::new("tok");

        let mut events = Vec::new();
        let mut on_progress = |e: ProgressEvent| events.push(e);
        let video = Uploader::new(&transport, &auth)
            .upload(&target, &mut on_progress)
            .await
            .unwrap();

        assert_eq!(video.id, "vid-600k");
        assert_eq!(transport.sessions.lock().unwrap().len(), 1);
        assert_eq!(transport.chunk_calls(), 3);
        assert_eq!(
            transport.ranges(),
            vec![
                "bytes 0-262143/600000",
                "bytes 262144-524287/600000",
                "bytes 524288-599999/600000",
            ]
        );

        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].bytes_uploaded <= w[1].bytes_uploaded));
        let last = events.last().unwrap();
        assert_eq!(last.bytes_uploaded, last.total_bytes);
        assert_eq!(last.total_bytes, 600_000);
    }

    #[tokio::test]
    async fn negotiation_without_location_sends_no_chunks() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.mp4", 600_000);
        let target = prepare_target(&path, metadata()).unwrap();
        let transport = MockTransport::with_session(
            Ok(SessionResponse {
                status: 200,
                location: None,
                body: String::new(),
            }),
            vec![Reply::Final(200, DONE)],
        );
        let auth = StaticToken::new("tok");

        let mut events = 0;
        let mut on_progress = |_: ProgressEvent| events += 1;
        let err = Uploader::new(&transport, &auth)
            .upload(&target, &mut on_progress)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Negotiation(_)));
        assert_eq!(transport.chunk_calls(), 0);
        assert_eq!(events, 0);
    }

    #[tokio::test]
    async fn cancelled_upload_does_not_negotiate() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.mp4", 10);
        let target = prepare_target(&path, metadata()).unwrap();
        let transport = MockTransport::new(vec![Reply::Final(200, DONE)]);
        let auth = StaticToken::new("tok");

        let uploader = Uploader::new(&transport, &auth);
        uploader.cancel_token().cancel();
        let err = uploader.upload(&target, &mut |_| {}).await.unwrap_err();

        assert!(matches!(err, UploadError::Cancelled));
        assert!(transport.sessions.lock().unwrap().is_empty());
        assert_eq!(transport.chunk_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_negotiation() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.mp4", 10);
        let target = prepare_target(&path, metadata()).unwrap();
        let transport = MockTransport::hanging_session();
        let auth = StaticToken::new("tok");

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = Uploader::new(&transport, &auth)
            .with_cancel(cancel)
            .upload(&target, &mut |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Cancelled));
        assert_eq!(transport.sessions.lock().unwrap().len(), 1);
        assert_eq!(transport.chunk_calls(), 0);
    }

    #[tokio::test]
    async fn external_cancel_token_is_honoured() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "clip.mp4", 600_000);
        let target = prepare_target(&path, metadata()).unwrap();
        let transport = MockTransport::new(vec![
            Reply::Status(308),
            Reply::Status(308),
            Reply::Final(200, DONE),
        ]);
        let auth = StaticToken::new("tok");

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut on_progress = move |e: ProgressEvent| {
            if e.bytes_uploaded >= 524_288 {
                trigger.cancel();
            }
        };
        let err = Uploader::new(&transport, &auth)
            .with_cancel(cancel)
            .upload(&target, &mut on_progress)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Cancelled));
        assert_eq!(transport.chunk_calls(), 2);
    }
}
