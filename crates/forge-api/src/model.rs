//! Wire types for the forge repository REST API.

use serde::{Deserialize, Serialize};

/// Creation request body for a new repository.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPayload {
    pub name: String,
    pub scm_id: String,
    pub forkable: bool,
}

impl RepositoryPayload {
    /// Payload for a plain, forkable git repository.
    pub fn git(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scm_id: "git".to_string(),
            forkable: true,
        }
    }
}

/// Read-only projection of a repository as reported by the forge.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepository {
    /// Server-assigned short identifier, normally derived from the name.
    pub slug: String,
    pub scm_id: String,
}

/// Projection of a commit as reported by the forge.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCommit {
    /// Content-derived hash of the commit.
    pub id: String,
}
