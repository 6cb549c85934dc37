//! Per-scenario state shared by the step handlers.

use std::sync::Arc;

use forge_api::ApiClient;
use forge_config::Settings;
use forge_git::{CommitId, CommitIdentity, Workspace};
use forge_harness::StepError;

/// File written by the commit step.
pub const EXAMPLE_FILE: &str = "acceptance-marker.txt";
/// Contents of the committed file.
pub const EXAMPLE_CONTENT: &str = "created by the forge acceptance harness\n";
/// Message of the commit the suite produces.
pub const COMMIT_MESSAGE: &str = "Add acceptance marker";

/// State threaded through one scenario.
///
/// A fresh world is built for every scenario; the settings and the API
/// client are shared handles, the workspace and commit are scenario-local.
pub struct AcceptanceWorld {
    pub settings: Arc<Settings>,
    pub api: ApiClient,
    /// The live checkout, if a clone step has run
    pub workspace: Option<Workspace>,
    /// Id of the commit produced by the commit step
    pub last_commit: Option<CommitId>,
}

impl AcceptanceWorld {
    pub fn new(settings: Arc<Settings>, api: ApiClient) -> Self {
        Self {
            settings,
            api,
            workspace: None,
            last_commit: None,
        }
    }

    /// Repository a step targets: its first capture, or the configured
    /// default when the phrase elides the name.
    pub fn target_repository(&self, args: &[String]) -> String {
        args.first()
            .cloned()
            .unwrap_or_else(|| self.settings.repository.clone())
    }

    /// The workspace, or a step failure telling the author to clone first.
    pub fn workspace(&self) -> Result<&Workspace, StepError> {
        self.workspace
            .as_ref()
            .ok_or_else(|| StepError::failed("no cloned workspace; run a clone step first"))
    }

    /// Fixed author identity for commits made by the suite.
    pub fn identity() -> CommitIdentity {
        CommitIdentity::new("Forge Acceptance", "acceptance@forge.invalid")
    }
}
