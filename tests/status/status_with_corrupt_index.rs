use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::garbage("not an index line\n", 1)]
#[case::bad_mode(
    "100644 5626abf0f72e58d7a153368ba57db4c673c0e171 1.txt\n\
     100600 5626abf0f72e58d7a153368ba57db4c673c0e171 2.txt\n",
    2
)]
#[case::short_oid("100644 5626abf 1.txt\n", 1)]
fn corrupt_index_is_reported(
    init_repository_dir: TempDir,
    #[case] content: &str,
    #[case] line: usize,
) {
    let dir = init_repository_dir.path();
    let index_path = dir.join(".twig").join("index");
    std::fs::write(&index_path, content).unwrap();

    run_twig_command(dir, &["status"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "index file is corrupt at line {line}"
        )));

    run_twig_command(dir, &["add", "1.txt"])
        .assert()
        .failure()
        .code(1);

    assert_eq!(read_file(&index_path), content);
}
