//! Transport error types.

/// Failure to get a usable HTTP response from the API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request failed (connection refused, DNS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}
