use crate::common::command::{read_head_file, repository_dir, run_twig_command, twig_commit, twig_output};
use crate::common::file::{FileSpec, delete_path, read_file, snapshot_workspace, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn corrupt_target_blob_leaves_everything_unchanged(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "1".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "1".to_string()));
    run_twig_command(dir, &["add", "."]).assert().success();
    twig_commit(dir, "m1").assert().success();

    run_twig_command(dir, &["branch", "f"]).assert().success();
    run_twig_command(dir, &["checkout", "f"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "2".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "2b".to_string()));
    run_twig_command(dir, &["add", "."]).assert().success();
    twig_commit(dir, "m2").assert().success();
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    write_file(FileSpec::new(dir.join("scratch.txt"), "2b".to_string()));
    let oid = twig_output(dir, &["hash-object", "scratch.txt"]);
    let oid = oid.trim();
    delete_path(&dir.join("scratch.txt"));

    let object_path = dir.join(".twig").join("objects").join(&oid[..2]).join(&oid[2..]);
    let mut permissions = std::fs::metadata(&object_path).unwrap().permissions();
    permissions.set_readonly(false);
    std::fs::set_permissions(&object_path, permissions).unwrap();
    std::fs::write(&object_path, b"garbage").unwrap();

    let workspace_before = snapshot_workspace(dir);
    let index_before = read_file(&dir.join(".twig").join("index"));

    run_twig_command(dir, &["checkout", "f"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(format!("object {oid} is corrupt")));

    assert_eq!(snapshot_workspace(dir), workspace_before);
    assert_eq!(read_file(&dir.join(".twig").join("index")), index_before);
    assert_eq!(read_head_file(dir), "ref: refs/heads/master\n");
    assert_eq!(twig_output(dir, &["status", "--porcelain"]), "");
}
