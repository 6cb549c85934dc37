//! Error types for forge-api

use reqwest::StatusCode;

/// Result type for forge-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the forge REST API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure or malformed response body.
    ///
    /// Decode failures surface here as well; they are never swallowed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist on the forge
    #[error("{what} not found")]
    NotFound { what: String },

    /// The forge answered with a status the operation cannot interpret
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl Error {
    /// True when the error represents a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
