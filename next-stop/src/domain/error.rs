//! Data format errors.
//!
//! These errors mean that a response body or a cache entry did not have the
//! shape we expect. They are distinct from transport failures: retrying the
//! same request would return the same bad data.

/// Content from the API or the route cache did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataFormatError {
    /// JSON could not be deserialized into the expected structure
    #[error("malformed {context}: {message}")]
    Json {
        context: &'static str,
        message: String,
    },

    /// Direction code does not index into the route's direction names
    #[error("direction code {code} out of range for route {route} ({available} directions)")]
    DirectionOutOfRange {
        route: String,
        code: i64,
        available: usize,
    },

    /// Timestamp is not ISO-8601 with an offset
    #[error("invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },

    /// Required field absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl DataFormatError {
    /// Wrap a serde_json error with a description of what was being parsed.
    pub fn json(context: &'static str, err: serde_json::Error) -> Self {
        Self::Json {
            context,
            message: err.to_string(),
        }
    }
}
