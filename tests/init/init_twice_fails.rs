use crate::common::command::{read_head_file, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_twice_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: repository already exists"));

    assert_eq!(read_head_file(repository_dir.path()), "ref: refs/heads/master\n");

    Ok(())
}
