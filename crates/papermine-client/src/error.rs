//! Error types for completion calls

use thiserror::Error;

/// Errors a single provider exchange can fail with.
///
/// The client treats every variant as transient and retries; classification
/// exists for logging and for the final [`ClientError::ServiceUnavailable`]
/// cause.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network or transport failure
    #[error("communication error: {0}")]
    Communication(String),

    /// Service replied with a non-success status
    #[error("service error (HTTP {status}): {body}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body, truncated by the provider
        body: String,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("rate limit exceeded")]
    RateLimited,

    /// Service payload could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by the retrying completion client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Every retry attempt failed; carries the last underlying cause
    #[error("service unavailable after {attempts} attempts: {last_error}")]
    ServiceUnavailable {
        /// Number of attempts issued
        attempts: u32,
        /// The failure from the final attempt
        last_error: String,
    },
}
