//! Environment-driven settings for the forge acceptance harness.
//!
//! All configuration comes from the process environment and is read exactly
//! once into a [`Settings`] struct, which callers pass by reference. There is
//! no global mutable state and no configuration file.

use std::path::PathBuf;

pub mod error;

pub use error::{Error, Result};

/// Base HTTP URL of the forge, e.g. `https://forge.example.com`.
pub const HTTP_URL_VAR: &str = "FORGE_HTTP_URL";
/// Base SSH URL of the forge, e.g. `ssh://git@forge.example.com:7999`.
pub const SSH_URL_VAR: &str = "FORGE_SSH_URL";
/// Project key the target repositories live under.
pub const PROJECT_VAR: &str = "FORGE_PROJECT";
/// Username for HTTP Basic authentication.
pub const USERNAME_VAR: &str = "FORGE_USERNAME";
/// Password for HTTP Basic authentication.
pub const PASSWORD_VAR: &str = "FORGE_PASSWORD";
/// Default repository name for steps that elide the name.
pub const REPOSITORY_VAR: &str = "FORGE_REPOSITORY";
/// Optional root directory for scratch checkouts.
pub const WORKDIR_VAR: &str = "FORGE_WORKDIR";

/// Resolved harness configuration.
///
/// Constructed once at startup via [`Settings::from_env`] and shared by
/// reference with every component that needs it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base HTTP URL, without a trailing slash.
    pub http_url: String,
    /// Base SSH URL, without a trailing slash.
    pub ssh_url: String,
    /// Project key.
    pub project: String,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Default repository name.
    pub repository: String,
    /// Root directory for scratch checkouts.
    pub workdir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Every variable except [`WORKDIR_VAR`] is required; the first missing
    /// one is reported as [`Error::MissingVar`] so the caller can fail fast.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup function.
    ///
    /// Empty values count as absent, matching the fail-fast check the
    /// original environment loader performed on each variable.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(Error::MissingVar { name }),
            }
        };

        let http_url = required(HTTP_URL_VAR)?;
        let ssh_url = required(SSH_URL_VAR)?;
        let project = required(PROJECT_VAR)?;
        let username = required(USERNAME_VAR)?;
        let password = required(PASSWORD_VAR)?;
        let repository = required(REPOSITORY_VAR)?;

        let workdir = match lookup(WORKDIR_VAR) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::temp_dir().join("forge-acceptance"),
        };

        Ok(Self {
            http_url: http_url.trim_end_matches('/').to_string(),
            ssh_url: ssh_url.trim_end_matches('/').to_string(),
            project,
            username,
            password,
            repository,
            workdir,
        })
    }

    /// SSH clone URL for a repository in the configured project.
    pub fn clone_url(&self, repository: &str) -> String {
        format!("{}/{}/{}.git", self.ssh_url, self.project, repository)
    }

    /// Scratch checkout path for a repository.
    pub fn checkout_path(&self, repository: &str) -> PathBuf {
        self.workdir.join(repository)
    }
}
