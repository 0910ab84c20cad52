/// Error types for the API client
use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the request pipeline.
///
/// Every failure is scoped to the single request that produced it; nothing
/// here is fatal to the process. Only [`ApiError::SessionExpired`] carries a
/// side effect (the session store has already been cleared by the time the
/// caller sees it).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401; the stored credential has been cleared
    #[error("Session expired or unauthorized; please log in again")]
    SessionExpired,

    /// Any other non-2xx response from the backend
    #[error("API error ({status}): {body}")]
    Http {
        status: StatusCode,
        /// Raw response body, useful for surfacing backend error messages
        body: String,
    },

    /// The response body could not be decoded into the expected type
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The token file could not be written or removed
    #[error("Failed to persist session: {0}")]
    Session(#[from] std::io::Error),
}
