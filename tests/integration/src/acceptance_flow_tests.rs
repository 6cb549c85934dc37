//! The acceptance step sequence against a stub forge.
//!
//! The HTTP API is stubbed with mockito; the git backend is a local bare
//! repository reachable over `file://`. The step bindings, the regex table,
//! and the runner are the real ones the suite ships.

use std::path::Path;
use std::sync::Arc;

use gherkin::{Feature, GherkinEnv};
use mockito::ServerGuard;
use tempfile::TempDir;

use forge_acceptance::{AcceptanceWorld, registry};
use forge_api::ApiClient;
use forge_config::Settings;
use forge_harness::{ScenarioRunner, StepError, StepRegistry, StepResult};

const REPOS_PATH: &str = "/rest/api/1.0/projects/ACC/repos";

fn stub_settings(http_url: &str, ssh_base: &str, workdir: &Path) -> Settings {
    Settings::from_source(|name| {
        let value = match name {
            forge_config::HTTP_URL_VAR => http_url.to_string(),
            forge_config::SSH_URL_VAR => ssh_base.to_string(),
            forge_config::PROJECT_VAR => "ACC".to_string(),
            forge_config::USERNAME_VAR => "tester".to_string(),
            forge_config::PASSWORD_VAR => "hunter2".to_string(),
            forge_config::REPOSITORY_VAR => "acc-test-1".to_string(),
            forge_config::WORKDIR_VAR => workdir.display().to_string(),
            _ => return None,
        };
        Some(value)
    })
    .unwrap()
}

/// Stub forge: a mockito server for HTTP plus a bare repo where the forge
/// would host `ACC/acc-test-1`.
struct StubForge {
    server: ServerGuard,
    dirs: TempDir,
    world: AcceptanceWorld,
    registry: StepRegistry<AcceptanceWorld>,
}

impl StubForge {
    async fn start() -> Self {
        let server = mockito::Server::new_async().await;
        let dirs = TempDir::new().unwrap();

        let remotes = dirs.path().join("remotes");
        let bare = remotes.join("ACC").join("acc-test-1.git");
        std::fs::create_dir_all(bare.parent().unwrap()).unwrap();
        forge_test_utils::git::bare_remote(&bare);

        let ssh_base = format!("file://{}", remotes.display());
        let workdir = dirs.path().join("scratch");
        let settings = Arc::new(stub_settings(&server.url(), &ssh_base, &workdir));
        let api = ApiClient::new(&settings).unwrap();
        let world = AcceptanceWorld::new(settings, api);

        Self {
            server,
            dirs,
            world,
            registry: registry(),
        }
    }

    fn bare_repo_path(&self) -> std::path::PathBuf {
        self.dirs.path().join("remotes").join("ACC").join("acc-test-1.git")
    }

    async fn step(&mut self, phrase: &str) -> StepResult {
        let (handler, args) = self
            .registry
            .resolve(phrase)
            .unwrap_or_else(|| panic!("undefined step: {phrase}"));
        handler(&mut self.world, args).await
    }
}

#[tokio::test]
async fn full_lifecycle_against_stub_forge() {
    let mut forge = StubForge::start().await;

    let delete = forge
        .server
        .mock("DELETE", format!("{REPOS_PATH}/acc-test-1").as_str())
        .with_status(404)
        .create_async()
        .await;
    let create = forge
        .server
        .mock("POST", REPOS_PATH)
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"slug":"acc-test-1","scmId":"git"}"#)
        .create_async()
        .await;
    let fetch = forge
        .server
        .mock("GET", format!("{REPOS_PATH}/acc-test-1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"slug":"acc-test-1","scmId":"git"}"#)
        .create_async()
        .await;

    forge.step("the repository acc-test-1 doesn't exist").await.unwrap();
    forge.step("I create repository acc-test-1").await.unwrap();
    forge.step("repository acc-test-1 should be accessible").await.unwrap();
    forge.step("clone the acc-test-1").await.unwrap();
    forge.step("commit a file").await.unwrap();
    forge.step("push to remote").await.unwrap();

    let commit_id = forge.world.last_commit.as_ref().unwrap().to_string();

    // The forge reports the commit the push delivered.
    forge
        .server
        .mock(
            "GET",
            format!("{REPOS_PATH}/acc-test-1/commits/{commit_id}").as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"id":"{commit_id}"}}"#))
        .create_async()
        .await;

    forge
        .step("the commit should be visible in repository acc-test-1")
        .await
        .unwrap();

    // The bare remote really holds the pushed commit.
    let remote = git2::Repository::open_bare(forge.bare_repo_path()).unwrap();
    let tip = remote
        .find_reference("refs/heads/master")
        .unwrap()
        .target()
        .unwrap();
    assert_eq!(tip.to_string(), commit_id);

    delete.assert_async().await;
    create.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn reconciliation_divergence_is_an_assertion_failure() {
    let mut forge = StubForge::start().await;

    forge.step("clone the acc-test-1").await.unwrap();
    forge.step("commit a file").await.unwrap();

    let commit_id = forge.world.last_commit.as_ref().unwrap().to_string();
    forge
        .server
        .mock(
            "GET",
            format!("{REPOS_PATH}/acc-test-1/commits/{commit_id}").as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"ffffffffffffffffffffffffffffffffffffffff"}"#)
        .create_async()
        .await;

    let err = forge
        .step("the commit should be visible in repository acc-test-1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, StepError::Assertion { .. }),
        "divergent ids must be an assertion failure, got: {err}"
    );
}

#[tokio::test]
async fn invisible_commit_is_an_assertion_failure() {
    let mut forge = StubForge::start().await;

    forge.step("clone the acc-test-1").await.unwrap();
    forge.step("commit a file").await.unwrap();

    let commit_id = forge.world.last_commit.as_ref().unwrap().to_string();
    forge
        .server
        .mock(
            "GET",
            format!("{REPOS_PATH}/acc-test-1/commits/{commit_id}").as_str(),
        )
        .with_status(404)
        .create_async()
        .await;

    let err = forge
        .step("the commit should be visible in repository acc-test-1")
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::Assertion { .. }));
}

#[tokio::test]
async fn mismatched_slug_is_an_assertion_failure() {
    let mut forge = StubForge::start().await;

    forge
        .server
        .mock("GET", format!("{REPOS_PATH}/acc-test-1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"slug":"something-else","scmId":"git"}"#)
        .create_async()
        .await;

    let err = forge
        .step("repository acc-test-1 should be accessible")
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::Assertion { .. }));
}

/// Same features, two seeds: every scenario must reach the same verdict.
#[tokio::test]
async fn runner_verdicts_are_seed_independent() {
    let mut forge = StubForge::start().await;

    forge
        .server
        .mock("DELETE", format!("{REPOS_PATH}/acc-test-1").as_str())
        .with_status(404)
        .create_async()
        .await;
    forge
        .server
        .mock("POST", REPOS_PATH)
        .with_status(201)
        .with_body(r#"{"slug":"acc-test-1","scmId":"git"}"#)
        .create_async()
        .await;
    forge
        .server
        .mock("GET", format!("{REPOS_PATH}/acc-test-1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"slug":"acc-test-1","scmId":"git"}"#)
        .create_async()
        .await;

    let text = "\
Feature: Clean slate
  Scenario: recreate
    Given the repository doesn't exist
    When I create the repository
    Then the repository should be accessible

  Scenario: lookup only
    Then the repository should be accessible

  Scenario: undefined phrase
    Given nobody registered this phrase
";
    let features = [Feature::parse(text, GherkinEnv::default()).unwrap()];

    let settings = forge.world.settings.clone();
    let api = forge.world.api.clone();
    let runner = ScenarioRunner::new(registry(), move || {
        AcceptanceWorld::new(settings.clone(), api.clone())
    });

    let report_a = runner.run(&features, 11).await;
    let report_b = runner.run(&features, 97).await;

    let verdicts = |report: &forge_harness::RunReport| {
        let mut v: Vec<(String, bool)> = report
            .outcomes
            .iter()
            .map(|o| (o.scenario.clone(), o.passed()))
            .collect();
        v.sort();
        v
    };

    assert_eq!(verdicts(&report_a), verdicts(&report_b));
    assert_eq!(report_a.passed(), 2);
    assert_eq!(report_a.failed(), 1);
}
