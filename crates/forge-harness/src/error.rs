//! Error types for forge-harness

use std::path::PathBuf;

/// Result type for forge-harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading features
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("No feature files found in {dir}")]
    NoFeatures { dir: PathBuf },
}

/// Failure of a single step within a scenario.
///
/// Both variants mark the scenario failed and are recoverable at run level:
/// the runner records the outcome and moves on to the next scenario.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// An expectation about observed state did not hold
    #[error("assertion failed: {message}")]
    Assertion { message: String },

    /// The operation behind the step could not be carried out
    #[error("{message}")]
    Failed { message: String },
}

impl StepError {
    /// Assertion failure with the given message.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Operational failure wrapping an underlying error.
    pub fn failed(source: impl std::fmt::Display) -> Self {
        Self::Failed {
            message: source.to_string(),
        }
    }
}
