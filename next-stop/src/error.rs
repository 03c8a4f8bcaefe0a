//! Crate-level error type.

use crate::domain::DataFormatError;
use crate::mbta::TransportError;

/// Errors that abort an arrival lookup.
///
/// Neither kind is retried. Cache write failures never show up here; they
/// are logged and dropped where they happen.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(err))
    }
}
