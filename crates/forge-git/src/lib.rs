//! Local git workspace driver for the forge acceptance harness.
//!
//! Wraps the git operations the acceptance suite performs against a scratch
//! checkout: clone over SSH, write/stage/commit, push, and history listing.
//! There is exactly one push path, through libgit2.

pub mod commits;
pub mod error;
pub mod workspace;

pub use commits::{CommitId, CommitInfo, list_recent_commits};
pub use error::{Error, Result};
pub use workspace::{CommitIdentity, Workspace};
