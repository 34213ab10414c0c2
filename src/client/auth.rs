use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Not logged in")]
    NotAuthenticated,
    #[error("Token acquisition failed: {0}")]
    Acquisition(String),
}

/// The identity provider's contract as seen from the client: hand over a
/// bearer token that is valid for the duration of one request.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// Serves a fixed token. Used by tests and command-line tools that already
/// hold a credential.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        Ok(self.token.clone())
    }
}
