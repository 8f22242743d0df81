//! Help Life API error types

/// Errors raised before a response is received.
///
/// A response with a non-2xx status is not an error at this level; callers
/// inspect [`super::ApiResponse::status`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint {path}: {source}")]
    InvalidUrl {
        path: String,
        source: url::ParseError,
    },
    /// The bearer token is not a valid header value.
    #[error("token contains characters not allowed in a header")]
    InvalidToken,
    /// Transport failure: unreachable host, refused connection, broken body.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
}
