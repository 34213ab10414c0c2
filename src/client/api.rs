use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::client::auth::{AccessTokenProvider, TokenError};
use crate::models::{CreateWorkflowRequest, UpdateWorkflowRequest, Workflow};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Not authorized")]
    Unauthorized,
    #[error("Workflow not found")]
    NotFound,
    #[error("Service error: {0}")]
    Service(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Token(#[from] TokenError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the workflow endpoints. Every request carries a bearer
/// token freshly obtained from the provider.
pub struct WorkflowsClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl WorkflowsClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    pub async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(format!("{}/api/workflows", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn create_workflow(&self, name: &str) -> Result<Workflow, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(format!("{}/api/workflows", self.base_url))
            .bearer_auth(token)
            .json(&CreateWorkflowRequest {
                name: Some(name.to_string()),
            })
            .send()
            .await?;

        decode(response).await
    }

    pub async fn update_workflow(&self, id: i32, name: &str) -> Result<Workflow, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .put(format!("{}/api/workflows/{}", self.base_url, id))
            .bearer_auth(token)
            .json(&UpdateWorkflowRequest {
                name: Some(name.to_string()),
            })
            .send()
            .await?;

        decode(response).await
    }

    /// Returns the deleted record's prior state.
    pub async fn delete_workflow(&self, id: i32) -> Result<Workflow, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .delete(format!("{}/api/workflows/{}", self.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = error_message(response).await;
    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::InvalidInput(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Service(message),
    })
}

async fn error_message(response: reqwest::Response) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => "Request failed".to_string(),
    }
}
