//! Session negotiation: one authenticated request, one session URL.

use tracing::{debug, info};
use vidpush_protocol::{UploadTarget, VideoResource};

use crate::auth::AuthProvider;
use crate::error::UploadError;
use crate::session::UploadSession;
use crate::transport::{SessionRequest, UploadTransport};

/// Creates upload sessions.
pub struct Negotiator<'a> {
    transport: &'a dyn UploadTransport,
    auth: &'a dyn AuthProvider,
}

impl<'a> Negotiator<'a> {
    pub fn new(transport: &'a dyn UploadTransport, auth: &'a dyn AuthProvider) -> Self {
        Self { transport, auth }
    }

    /// Describes `target` to the API and returns the session to upload into.
    ///
    /// Fails with [`UploadError::Negotiation`] if the request cannot be
    /// sent, the status is not 2xx, or the response carries no `Location`.
    /// Nothing is retried.
    pub async fn negotiate(&self, target: &UploadTarget) -> Result<UploadSession, UploadError> {
        let token = self.auth.token()?;

        let request = SessionRequest {
            token,
            resource: VideoResource::from(target.metadata()),
            content_length: target.size(),
            content_type: target.content_type().to_string(),
        };

        debug!(
            total_bytes = target.size(),
            content_type = %target.content_type(),
            "negotiating upload session"
        );

        let response = self
            .transport
            .create_session(&request)
            .await
            .map_err(|e| UploadError::Negotiation(format!("request failed: {e}")))?;

        if !(200..300).contains(&response.status) {
            return Err(UploadError::Negotiation(format!(
                "status {}: {}",
                response.status,
                response.body.trim()
            )));
        }

        let location = response
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| UploadError::Negotiation("response has no Location header".into()))?;

        info!(total_bytes = target.size(), "upload session created");
        Ok(UploadSession::new(
            location,
            target.size(),
            target.content_type(),
        ))
    }
}
