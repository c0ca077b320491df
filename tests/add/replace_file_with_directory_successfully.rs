use crate::common::command::{repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn replace_file_with_directory_successfully(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file_path = repository_dir.path().join("item");
    write_file(FileSpec::new(file_path.clone(), "file".to_string()));
    run_twig_command(repository_dir.path(), &["add", "item"])
        .assert()
        .success();

    delete_path(&file_path);
    write_file(FileSpec::new(file_path.join("nested.txt"), "nested".to_string()));
    run_twig_command(repository_dir.path(), &["add", "item"])
        .assert()
        .success();

    assert_eq!(
        twig_output(repository_dir.path(), &["status", "--porcelain"]),
        "A  item/nested.txt\n"
    );
}

#[rstest]
fn replace_directory_having_nested_children_with_file_successfully(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let dir_path = repository_dir.path().join("item");
    write_file(FileSpec::new(dir_path.join("a.txt"), "a".to_string()));
    write_file(FileSpec::new(dir_path.join("deep").join("b.txt"), "b".to_string()));
    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    delete_path(&dir_path);
    write_file(FileSpec::new(dir_path, "now a file".to_string()));
    run_twig_command(repository_dir.path(), &["add", "item"])
        .assert()
        .success();

    assert_eq!(
        twig_output(repository_dir.path(), &["status", "--porcelain"]),
        "A  item\n"
    );
}
