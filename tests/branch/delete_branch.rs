use crate::common::command::{
    get_head_commit_sha, repository_with_multiple_commits, run_twig_command, twig_output,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn delete_branch(repository_with_multiple_commits: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;
    let head = get_head_commit_sha(repository_dir.path())?;
    run_twig_command(repository_dir.path(), &["branch", "topic"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["branch", "-d", "topic"])
        .assert()
        .success()
        .stdout(format!("Deleted branch topic (was {}).\n", &head[..7]));

    assert!(!repository_dir.path().join(".twig/refs/heads/topic").exists());
    assert_eq!(twig_output(repository_dir.path(), &["branch"]), "* master\n");

    Ok(())
}

#[rstest]
fn delete_hierarchical_branch_prunes_empty_directories(repository_with_multiple_commits: TempDir) {
    let repository_dir = repository_with_multiple_commits;
    run_twig_command(repository_dir.path(), &["branch", "feature/deep/topic"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["branch", "--delete", "feature/deep/topic"])
        .assert()
        .success();

    assert!(!repository_dir.path().join(".twig/refs/heads/feature").exists());
    assert!(repository_dir.path().join(".twig/refs/heads").is_dir());
}

#[rstest]
fn delete_checked_out_branch_fails(repository_with_multiple_commits: TempDir) {
    let repository_dir = repository_with_multiple_commits;

    run_twig_command(repository_dir.path(), &["branch", "-d", "master"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot delete branch 'master' checked out"));

    assert!(repository_dir.path().join(".twig/refs/heads/master").is_file());
}

#[rstest]
fn delete_missing_branch_fails(repository_with_multiple_commits: TempDir) {
    run_twig_command(repository_with_multiple_commits.path(), &["branch", "-d", "ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown revision or reference 'ghost'"));
}
