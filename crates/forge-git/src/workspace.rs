//! Scratch checkout of a remote repository.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use git2::build::RepoBuilder;
use git2::{Cred, ErrorClass, ErrorCode, FetchOptions, PushOptions, RemoteCallbacks, Repository, Signature};

use crate::commits::{CommitId, CommitInfo, list_recent_commits};
use crate::error::{Error, Result};

/// Author/committer identity used for commits made by the harness.
#[derive(Debug, Clone)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One cloned checkout rooted at a scratch directory.
///
/// A workspace is created by [`Workspace::clone`], which removes and
/// replaces any prior checkout at the same path. At most one workspace per
/// scenario is live at a time; the caller owns that invariant.
pub struct Workspace {
    path: PathBuf,
    repo: Repository,
}

impl Workspace {
    /// Clone `url` into `path`, replacing whatever was there before.
    ///
    /// An empty remote is tolerated: when the clone fails with libgit2's
    /// empty-remote signature (unborn remote HEAD), the workspace falls back
    /// to a fresh local repository with `origin` pointing at `url`, ready
    /// for the commit and push steps. Any other failure propagates.
    pub fn clone(url: &str, path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_dir_all(path)?;
        }

        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(auth_callbacks(None));

        match RepoBuilder::new().fetch_options(fetch).clone(url, path) {
            Ok(repo) => {
                tracing::info!(url, path = %path.display(), "cloned repository");
                Ok(Self {
                    path: path.to_path_buf(),
                    repo,
                })
            }
            Err(err) if is_empty_remote(&err) => {
                tracing::info!(url, "remote is empty, initialising fresh checkout");
                // The failed clone may leave a partial directory behind.
                if path.exists() {
                    fs::remove_dir_all(path)?;
                }
                let repo = Repository::init(path)?;
                // Pin the unborn branch; the push refspec must not depend on
                // the host's init.defaultBranch.
                repo.set_head("refs/heads/master")?;
                repo.remote("origin", url)?;
                Ok(Self {
                    path: path.to_path_buf(),
                    repo,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Open an existing checkout.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Root directory of the checkout.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a file inside the checkout.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        fs::write(self.path.join(name), contents)?;
        Ok(())
    }

    /// Add a path to the index.
    pub fn stage(&self, name: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(Path::new(name))?;
        index.write()?;
        tracing::debug!(file = name, "staged file");
        Ok(())
    }

    /// Commit the staged index with the given identity.
    ///
    /// Works on an unborn branch as well, producing the root commit.
    pub fn commit(&self, identity: &CommitIdentity, message: &str) -> Result<CommitId> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = Signature::now(&identity.name, &identity.email)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(err) if err.code() == ErrorCode::UnbornBranch => None,
            Err(err) => return Err(err.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        tracing::info!(commit = %oid, message, "created commit");
        Ok(oid.into())
    }

    /// Push the current branch to `origin`.
    ///
    /// Rejections reported by the remote for the pushed reference surface as
    /// [`Error::PushRejected`]; transport failures as [`Error::PushFailed`].
    pub fn push(&self) -> Result<()> {
        let branch = self.current_branch()?;
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

        let mut remote = self
            .repo
            .find_remote("origin")
            .map_err(|_| Error::RemoteNotFound {
                name: "origin".to_string(),
            })?;

        let rejection: RefCell<Option<(String, String)>> = RefCell::new(None);
        {
            let mut callbacks = auth_callbacks(self.repo.config().ok());
            callbacks.push_update_reference(|reference, status| {
                if let Some(message) = status {
                    *rejection.borrow_mut() = Some((reference.to_string(), message.to_string()));
                }
                Ok(())
            });

            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            remote
                .push(&[&refspec], Some(&mut options))
                .map_err(|e| Error::PushFailed {
                    message: e.message().to_string(),
                })?;
        }

        if let Some((reference, message)) = rejection.into_inner() {
            return Err(Error::PushRejected { reference, message });
        }

        tracing::info!(branch = %branch, "pushed to origin");
        Ok(())
    }

    /// Name of the branch HEAD points at.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if head.is_branch() {
            Ok(head.shorthand().unwrap_or("HEAD").to_string())
        } else {
            Ok("HEAD".to_string())
        }
    }

    /// The last `max_count` commits reachable from HEAD, most recent first.
    pub fn recent_commits(&self, max_count: usize) -> Result<Vec<CommitInfo>> {
        list_recent_commits(&self.repo, max_count)
    }

    /// Id of the commit HEAD points at.
    pub fn head_commit(&self) -> Result<CommitId> {
        match self.repo.head() {
            Ok(head) => Ok(head.peel_to_commit()?.id().into()),
            Err(err) if err.code() == ErrorCode::UnbornBranch => Err(Error::EmptyHistory {
                path: self.path.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

/// Credential chain for remote operations: SSH agent first, then the
/// configured credential helper, then libgit2's default.
fn auth_callbacks<'cb>(config: Option<git2::Config>) -> RemoteCallbacks<'cb> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed| {
        if allowed.is_ssh_key() {
            if let Some(user) = username_from_url {
                return Cred::ssh_key_from_agent(user);
            }
        }
        if allowed.is_user_pass_plaintext() {
            if let Some(cfg) = config.as_ref() {
                if let Ok(cred) = Cred::credential_helper(cfg, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }
        Cred::default()
    });
    callbacks
}

/// Structural check for libgit2's empty-remote clone failure.
///
/// A freshly created repository has no branches, so the remote HEAD refers
/// to an unborn reference and the checkout of the default branch fails.
/// Only that signature is tolerated; other clone failures are genuine.
fn is_empty_remote(err: &git2::Error) -> bool {
    err.code() == ErrorCode::UnbornBranch
        || (err.class() == ErrorClass::Reference && err.code() == ErrorCode::NotFound)
}
