use crate::common::command::{repository_with_multiple_commits, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("bad..name")]
#[case(".hidden")]
#[case("trailing/")]
#[case("name.lock")]
#[case("with space")]
#[case("tilde~1")]
#[case("caret^")]
#[case("colon:name")]
#[case("at@{brace")]
#[case("HEAD")]
fn create_branch_with_invalid_name(repository_with_multiple_commits: TempDir, #[case] name: &str) {
    run_twig_command(repository_with_multiple_commits.path(), &["branch", name])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a valid branch name"));
}
