//! API client module for the Help Life REST service

mod client;
mod error;
mod traits;

pub use client::{ApiClient, ApiResponse};
pub use error::ApiError;
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use traits::MockApiClientTrait;
