//! HTTP client for the Help Life REST API
//!
//! Thin wrapper over `reqwest` posting JSON payloads to fixed endpoints.
//! There is no retry and no request timeout: a request runs until the server
//! answers or the transport fails.

use super::error::ApiError;
use super::traits::ApiClientTrait;
use crate::state::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

/// Raw outcome of a request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for the Help Life API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client rooted at `base_url`
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidUrl {
                path: path.to_string(),
                source,
            })
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn post_json(
        &self,
        path: &str,
        token: Option<String>,
        body: &SubmissionPayload,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path)?;

        let mut request = self
            .http
            .post(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidToken)?;
            request = request.header(AUTHORIZATION, value);
        }

        tracing::debug!(%url, "POST");
        let response = request.send().await.map_err(|e| ApiError::Http {
            endpoint: url.to_string(),
            source: e,
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Http {
            endpoint: url.to_string(),
            source: e,
        })?;
        tracing::debug!(%url, status, "response received");

        Ok(ApiResponse { status, body })
    }
}
