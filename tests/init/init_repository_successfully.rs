use crate::common::command::{read_head_file, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty twig repository in .+\.twig\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let git_dir = repository_dir.path().join(".twig");
    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").join("heads").is_dir());
    assert_eq!(read_head_file(repository_dir.path()), "ref: refs/heads/master\n");

    Ok(())
}

#[rstest]
fn init_repository_at_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("project").join(".twig").join("HEAD").is_file());

    Ok(())
}

#[rstest]
fn fresh_repository_has_no_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "your current branch 'master' does not have any commits yet",
        ));

    Ok(())
}
