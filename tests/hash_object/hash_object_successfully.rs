use crate::common::command::{repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

const HELLO_OID: &str = "ce013625030ba8dba906f756967f9e9ca394464a";
const EMPTY_OID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

#[rstest]
#[case::text("hello\n", HELLO_OID)]
#[case::empty("", EMPTY_OID)]
fn hash_without_writing(repository_dir: TempDir, #[case] content: &str, #[case] oid: &str) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("file.txt"), content.to_string()));

    assert_eq!(twig_output(dir, &["hash-object", "file.txt"]), format!("{oid}\n"));
    assert!(!dir.join(".twig/objects").join(&oid[..2]).exists());
}

#[rstest]
fn hash_outside_a_repository(repository_dir: TempDir) {
    let dir = repository_dir.path();
    write_file(FileSpec::new(dir.join("file.txt"), "hello\n".to_string()));

    assert_eq!(
        twig_output(dir, &["hash-object", "file.txt"]),
        format!("{HELLO_OID}\n")
    );
    assert!(!dir.join(".twig").exists());

    run_twig_command(dir, &["hash-object", "-w", "file.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a twig repository"));
}

#[rstest]
fn hash_and_write(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("file.txt"), "hello\n".to_string()));

    run_twig_command(dir, &["hash-object", "-w", "file.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    let object_path = dir
        .join(".twig")
        .join("objects")
        .join(&HELLO_OID[..2])
        .join(&HELLO_OID[2..]);
    assert!(object_path.is_file());
    assert_eq!(twig_output(dir, &["cat-file", HELLO_OID]), "hello\n");

    // writing again leaves the stored object as it was
    let stored = std::fs::read(&object_path).unwrap();
    run_twig_command(dir, &["hash-object", "--write", "file.txt"])
        .assert()
        .success();
    assert_eq!(std::fs::read(&object_path).unwrap(), stored);
}

#[rstest]
fn hash_a_missing_file_fails(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["hash-object", "nope.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nope.txt"));
}
