use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredentials,
    #[error("Malformed authorization header")]
    MalformedHeader,
    #[error("Malformed bearer token")]
    MalformedToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Verifies that a request carries a usable bearer credential. Token
/// issuance and signature verification belong to the identity provider;
/// this service only checks presence, shape, and expiry.
#[derive(Debug, Default)]
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?;
        let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MalformedHeader)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }

        self.validate_token(token)
    }

    fn validate_token(&self, token: &str) -> Result<(), AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            // Opaque tokens carry no claims we can inspect; the identity
            // provider vouches for them.
            return Ok(());
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|_| AuthError::MalformedToken)?;
        let claims: serde_json::Value =
            serde_json::from_slice(&payload).map_err(|_| AuthError::MalformedToken)?;

        if let Some(exp) = claims.get("exp").and_then(|v| v.as_i64()) {
            if exp <= Utc::now().timestamp() {
                return Err(AuthError::TokenExpired);
            }
        }

        Ok(())
    }
}
