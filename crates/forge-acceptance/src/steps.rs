//! Step bindings: Gherkin phrases mapped to forge operations.
//!
//! Each phrase optionally names its repository; an elided name falls back
//! to the configured default, so one table serves both fixed-repository and
//! parameterized features.

use futures::future::BoxFuture;

use forge_git::Workspace;
use forge_harness::{StepError, StepRegistry, StepResult};

use crate::world::{AcceptanceWorld, COMMIT_MESSAGE, EXAMPLE_CONTENT, EXAMPLE_FILE};

/// The full step table of the acceptance suite.
pub fn registry() -> StepRegistry<AcceptanceWorld> {
    let mut registry = StepRegistry::new();
    registry.register(
        r"^the repository (?:([A-Za-z0-9_-]+) )?doesn't exist$",
        repository_absent,
    );
    registry.register(
        r"^I create (?:the repository|repository ([A-Za-z0-9_-]+))$",
        create_repository,
    );
    registry.register(
        r"^(?:the repository|repository ([A-Za-z0-9_-]+)) should be accessible$",
        repository_accessible,
    );
    registry.register(r"^clone the (?:repository|([A-Za-z0-9_-]+))$", clone_repository);
    registry.register(r"^commit a file$", commit_file);
    registry.register(r"^push to remote$", push_to_remote);
    registry.register(
        r"^the commit should be visible in (?:the repository|repository ([A-Za-z0-9_-]+))$",
        commit_visible,
    );
    registry
}

/// Clean slate: delete the repository, tolerating any status the forge
/// answers with (it is usually 404 here).
fn repository_absent(world: &mut AcceptanceWorld, args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let name = world.target_repository(&args);
        let status = world
            .api
            .delete_repository(&name)
            .await
            .map_err(StepError::failed)?;
        tracing::debug!(repository = %name, status = %status, "ensured repository is absent");
        Ok(())
    })
}

fn create_repository(world: &mut AcceptanceWorld, args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let name = world.target_repository(&args);
        let status = world
            .api
            .create_repository(&name)
            .await
            .map_err(StepError::failed)?;
        if !status.is_success() {
            tracing::warn!(repository = %name, status = %status, "create returned a non-success status");
        }
        Ok(())
    })
}

fn repository_accessible(
    world: &mut AcceptanceWorld,
    args: Vec<String>,
) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let name = world.target_repository(&args);
        let repository = world
            .api
            .fetch_repository(&name)
            .await
            .map_err(StepError::failed)?;
        if repository.slug != name {
            return Err(StepError::assertion(format!(
                "expected slug {name}, forge reports {}",
                repository.slug
            )));
        }
        Ok(())
    })
}

fn clone_repository(world: &mut AcceptanceWorld, args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let name = world.target_repository(&args);
        let url = world.settings.clone_url(&name);
        let path = world.settings.checkout_path(&name);
        let workspace = Workspace::clone(&url, &path).map_err(StepError::failed)?;
        world.workspace = Some(workspace);
        Ok(())
    })
}

fn commit_file(world: &mut AcceptanceWorld, _args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let commit = {
            let workspace = world.workspace()?;
            workspace
                .write_file(EXAMPLE_FILE, EXAMPLE_CONTENT)
                .map_err(StepError::failed)?;
            workspace.stage(EXAMPLE_FILE).map_err(StepError::failed)?;
            workspace
                .commit(&AcceptanceWorld::identity(), COMMIT_MESSAGE)
                .map_err(StepError::failed)?
        };
        world.last_commit = Some(commit);
        Ok(())
    })
}

fn push_to_remote(world: &mut AcceptanceWorld, _args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move { world.workspace()?.push().map_err(StepError::failed) })
}

/// Reconciliation: the most recent local commit must be reported by the
/// forge under the same id.
fn commit_visible(world: &mut AcceptanceWorld, args: Vec<String>) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let name = world.target_repository(&args);
        let local = {
            let workspace = world.workspace()?;
            let mut commits = workspace.recent_commits(1).map_err(StepError::failed)?;
            commits
                .pop()
                .ok_or_else(|| StepError::failed("workspace has no commits"))?
        };

        match world.api.fetch_commit(&name, local.id.as_str()).await {
            Ok(remote) if remote.id == local.id.as_str() => {
                tracing::info!(commit = %local.id, repository = %name, "commit is visible remotely");
                Ok(())
            }
            Ok(remote) => Err(StepError::assertion(format!(
                "local commit is {} but the forge reports {}",
                local.id, remote.id
            ))),
            Err(err) if err.is_not_found() => Err(StepError::assertion(format!(
                "commit {} is not visible in repository {name}",
                local.id
            ))),
            Err(err) => Err(StepError::failed(err)),
        }
    })
}
