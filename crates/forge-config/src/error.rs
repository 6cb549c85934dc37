//! Error types for forge-config

/// Result type for forge-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required environment variable is absent or empty
    #[error("{name} not set")]
    MissingVar { name: &'static str },
}
