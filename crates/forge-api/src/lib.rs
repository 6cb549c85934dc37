//! REST client for the forge repository API.
//!
//! Wraps the four repository operations the acceptance suite exercises:
//! create, fetch, delete, and commit lookup. Every request carries HTTP
//! Basic credentials; bodies are JSON.

pub mod client;
pub mod error;
pub mod model;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use model::{RemoteCommit, RemoteRepository, RepositoryPayload};
