//! Trait abstraction for the API client to enable mocking in tests

use super::client::ApiResponse;
use super::error::ApiError;
use crate::state::SubmissionPayload;
use async_trait::async_trait;

/// Trait for Help Life API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// POST a JSON payload to `path`, relative to the API base URL.
    ///
    /// Sends `Authorization: Bearer <token>` only when a token is given.
    /// Resolves to the response for any HTTP status; `Err` means no response
    /// was received.
    async fn post_json(
        &self,
        path: &str,
        token: Option<String>,
        body: &SubmissionPayload,
    ) -> Result<ApiResponse, ApiError>;
}
