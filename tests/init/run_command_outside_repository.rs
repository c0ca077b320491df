use crate::common::command::{repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn status_outside_repository_fails(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a twig repository"));
}

#[rstest]
fn commands_work_from_a_subdirectory(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("nested").join("file.txt"),
        "content".to_string(),
    ));

    run_twig_command(&repository_dir.path().join("nested"), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("?? nested/\n");
}

#[rstest]
fn unknown_flags_are_usage_errors(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["status", "--no-such-flag"])
        .assert()
        .failure()
        .code(2);
}
