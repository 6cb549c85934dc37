//! End-to-end git flow against local bare remotes.
//!
//! A commit produced in one checkout must be observable from an independent
//! second clone under the same id — the git half of the reconciliation the
//! acceptance suite performs against the live forge.

use forge_git::{CommitIdentity, Workspace};
use forge_test_utils::git::{temp_empty_remote, temp_seeded_remote};
use tempfile::TempDir;

fn identity() -> CommitIdentity {
    CommitIdentity::new("Forge Acceptance", "acceptance@forge.invalid")
}

#[test]
fn pushed_commit_is_visible_from_a_second_clone() {
    let (_remote_dir, url, _) = temp_seeded_remote();
    let scratch = TempDir::new().unwrap();

    let first = Workspace::clone(&url, &scratch.path().join("first")).unwrap();
    first.write_file("note.txt", "round trip").unwrap();
    first.stage("note.txt").unwrap();
    let pushed = first.commit(&identity(), "round trip commit").unwrap();
    first.push().unwrap();

    let second = Workspace::clone(&url, &scratch.path().join("second")).unwrap();
    assert_eq!(second.head_commit().unwrap(), pushed);
    assert!(second.path().join("note.txt").exists());

    let history = second.recent_commits(10).unwrap();
    assert_eq!(history[0].id, pushed);
    assert_eq!(history[0].summary, "round trip commit");
}

#[test]
fn empty_remote_roundtrip_from_first_commit() {
    let (_remote_dir, url) = temp_empty_remote();
    let scratch = TempDir::new().unwrap();

    let first = Workspace::clone(&url, &scratch.path().join("first")).unwrap();
    first.write_file("note.txt", "born empty").unwrap();
    first.stage("note.txt").unwrap();
    let pushed = first.commit(&identity(), "root commit").unwrap();
    first.push().unwrap();

    let second = Workspace::clone(&url, &scratch.path().join("second")).unwrap();
    assert_eq!(second.head_commit().unwrap(), pushed);

    let history = second.recent_commits(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].author, "Forge Acceptance");
}
