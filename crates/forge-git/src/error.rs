//! Error types for forge-git

use std::path::PathBuf;

/// Result type for forge-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in forge-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Push of '{reference}' rejected by remote: {message}")]
    PushRejected { reference: String, message: String },

    #[error("No commits in workspace at {path}")]
    EmptyHistory { path: PathBuf },
}
