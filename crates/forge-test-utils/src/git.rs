//! Bare-repository fixtures standing in for the forge's git backend.

use std::path::Path;

use tempfile::TempDir;

/// Empty bare remote in a fresh temp directory.
///
/// Returns the directory guard (keep it alive for the remote's lifetime)
/// and the `file://` URL to clone from.
pub fn temp_empty_remote() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp_empty_remote: failed to create temp dir");
    let path = dir.path().join("remote.git");
    bare_remote(&path);
    let url = file_url(&path);
    (dir, url)
}

/// Seeded bare remote in a fresh temp directory.
///
/// Returns the directory guard, the `file://` URL, and the seeded commit id.
pub fn temp_seeded_remote() -> (TempDir, String, String) {
    let dir = TempDir::new().expect("temp_seeded_remote: failed to create temp dir");
    let path = dir.path().join("remote.git");
    let commit = seeded_bare_remote(&path);
    let url = file_url(&path);
    (dir, url, commit)
}

/// `file://` URL for a local path, usable as a clone/push target.
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Creates an empty bare repository, the state a freshly created forge
/// repository is in before the first push.
///
/// HEAD is pinned to `refs/heads/master` so clones resolve a deterministic
/// default branch.
///
/// # Panics
/// Panics if repository creation fails.
pub fn bare_remote(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init_bare(path).unwrap_or_else(|e| {
        panic!("bare_remote: failed to init bare repo at {}: {e}", path.display())
    });
    repo.set_head("refs/heads/master")
        .unwrap_or_else(|e| panic!("bare_remote: failed to pin HEAD: {e}"));
    repo
}

/// Creates a bare repository seeded with one commit on `master`, the state
/// of a forge repository that already has history.
///
/// The commit is written directly into the object store (no worktree
/// needed). Returns the seeded commit id as a hex string.
///
/// # Panics
/// Panics if any git operation fails.
pub fn seeded_bare_remote(path: &Path) -> String {
    let repo = bare_remote(path);

    let blob = repo
        .blob(b"# seed\n")
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to write blob: {e}"));

    let mut builder = repo
        .treebuilder(None)
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to create tree builder: {e}"));
    builder
        .insert("README.md", blob, 0o100644)
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to insert blob: {e}"));
    let tree_id = builder
        .write()
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to write tree: {e}"));
    let tree = repo
        .find_tree(tree_id)
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to find tree: {e}"));

    let signature = git2::Signature::now("Seed User", "seed@test.com")
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to build signature: {e}"));

    let commit = repo
        .commit(
            Some("refs/heads/master"),
            &signature,
            &signature,
            "Initial commit",
            &tree,
            &[],
        )
        .unwrap_or_else(|e| panic!("seeded_bare_remote: failed to commit: {e}"));

    commit.to_string()
}
