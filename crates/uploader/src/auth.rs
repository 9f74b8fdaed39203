//! Bearer token sources for the negotiation request.
//!
//! Only negotiation is authenticated. Chunk uploads go to the session URL,
//! which is itself the capability, so the token is requested exactly once
//! per upload.

/// Errors from token providers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("token is empty")]
    Empty,
}

/// Supplies the bearer token for session negotiation.
pub trait AuthProvider: Send + Sync {
    fn token(&self) -> Result<String, AuthError>;
}

/// A fixed token known up front.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

impl AuthProvider for StaticToken {
    fn token(&self) -> Result<String, AuthError> {
        non_empty(self.0.clone())
    }
}

/// Reads the token from an environment variable at negotiation time.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable read.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl AuthProvider for EnvToken {
    fn token(&self) -> Result<String, AuthError> {
        let value =
            std::env::var(&self.var).map_err(|_| AuthError::MissingEnv(self.var.clone()))?;
        non_empty(value)
    }
}

fn non_empty(token: String) -> Result<String, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Empty);
    }
    Ok(token.to_string())
}
