//! HTTP client for the forge repository REST API.

use forge_config::Settings;
use reqwest::{Client, Response, StatusCode};

use crate::error::{Error, Result};
use crate::model::{RemoteCommit, RemoteRepository, RepositoryPayload};

const USER_AGENT: &str = concat!("forge-acceptance/", env!("CARGO_PKG_VERSION"));

/// Client for the repository endpoints of the forge REST API.
///
/// Holds a single [`reqwest::Client`]; clones share the underlying
/// connection pool, so one instance per process is enough.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    repos_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    /// Build a client from the harness settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            repos_url: format!(
                "{}/rest/api/1.0/projects/{}/repos",
                settings.http_url, settings.project
            ),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    /// Create a repository in the configured project.
    ///
    /// Returns the observed status without interpreting it; a conflicting or
    /// rejected creation is the caller's concern. Only transport failures
    /// are errors.
    pub async fn create_repository(&self, name: &str) -> Result<StatusCode> {
        let response = self
            .http
            .post(&self.repos_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&RepositoryPayload::git(name))
            .send()
            .await?;

        let status = response.status();
        tracing::info!(repository = name, status = %status, "created repository");
        Ok(status)
    }

    /// Fetch a repository by name.
    ///
    /// A 404 maps to [`Error::NotFound`]; any other non-2xx status maps to
    /// [`Error::UnexpectedStatus`]. A body that fails to decode is always an
    /// error, never silently ignored.
    pub async fn fetch_repository(&self, name: &str) -> Result<RemoteRepository> {
        let url = format!("{}/{}", self.repos_url, name);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let repository: RemoteRepository = self
            .decode(response, || format!("repository {name}"))
            .await?;
        tracing::debug!(slug = %repository.slug, "fetched repository");
        Ok(repository)
    }

    /// Delete a repository by name.
    ///
    /// Deleting an absent repository is the normal clean-slate path, so the
    /// observed status is returned as data rather than interpreted here.
    pub async fn delete_repository(&self, name: &str) -> Result<StatusCode> {
        let url = format!("{}/{}", self.repos_url, name);
        let response = self
            .http
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        tracing::info!(repository = name, status = %status, "deleted repository");
        Ok(status)
    }

    /// Fetch a commit of a repository by id.
    pub async fn fetch_commit(&self, name: &str, commit_id: &str) -> Result<RemoteCommit> {
        let url = format!("{}/{}/commits/{}", self.repos_url, name, commit_id);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        self.decode(response, || format!("commit {commit_id} in repository {name}"))
            .await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
        what: impl Fn() -> String,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { what: what() });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus { status, body });
        }

        Ok(response.json().await?)
    }
}
