use crate::common::command::{
    get_head_commit_sha, init_repository_dir, repository_dir, run_twig_command, twig_commit,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_with_unchanged_tree_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let head_before = get_head_commit_sha(repository_dir.path())?;

    twig_commit(repository_dir.path(), "again")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nothing to commit"));

    assert_eq!(get_head_commit_sha(repository_dir.path())?, head_before);

    Ok(())
}

#[rstest]
fn commit_in_empty_repository_fails(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "empty")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nothing to commit"));

    assert!(!repository_dir.path().join(".twig/refs/heads/master").exists());
}
