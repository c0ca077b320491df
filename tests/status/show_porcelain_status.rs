use crate::common::command::{init_repository_dir, repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, create_directory, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn clean_repository_has_no_output(init_repository_dir: TempDir) {
    assert_eq!(
        twig_output(init_repository_dir.path(), &["status", "--porcelain"]),
        ""
    );
}

#[rstest]
fn list_untracked_files_and_directories(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("loose.txt"), "loose".to_string()));
    write_file(FileSpec::new(dir.join("fresh").join("deep").join("x.txt"), "x".to_string()));
    write_file(FileSpec::new(dir.join("a").join("b").join("new.txt"), "new".to_string()));

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        "?? a/b/new.txt\n?? fresh/\n?? loose.txt\n"
    );
}

#[rstest]
fn empty_untracked_directories_are_not_listed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    create_directory(&dir.join("empty"));
    create_directory(&dir.join("outer").join("inner"));

    assert_eq!(twig_output(dir, &["status", "--porcelain"]), "");
}

#[rstest]
fn list_workspace_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    delete_path(&dir.join("a").join("2.txt"));

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        " M 1.txt\n D a/2.txt\n"
    );
}

#[rstest]
fn file_replaced_by_a_directory_is_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    delete_path(&dir.join("1.txt"));
    write_file(FileSpec::new(dir.join("1.txt").join("inner.txt"), "inner".to_string()));

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        " D 1.txt\n?? 1.txt/\n"
    );
}

#[rstest]
fn list_index_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    write_file(FileSpec::new(dir.join("z.txt"), "zed".to_string()));
    delete_path(&dir.join("a").join("b"));
    run_twig_command(dir, &["add", "."]).assert().success();

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        "M  1.txt\nD  a/b/3.txt\nA  z.txt\n"
    );
}

#[rstest]
fn staged_and_unstaged_changes_on_one_path(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "first".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "second".to_string()));
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    delete_path(&dir.join("1.txt"));

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        "MD 1.txt\nAM new.txt\n"
    );
}

#[cfg(unix)]
#[rstest]
fn mode_change_is_reported(init_repository_dir: TempDir) {
    use crate::common::file::make_executable;

    let dir = init_repository_dir.path();
    make_executable(&dir.join("1.txt"));
    assert_eq!(twig_output(dir, &["status", "--porcelain"]), " M 1.txt\n");

    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    assert_eq!(twig_output(dir, &["status", "--porcelain"]), "M  1.txt\n");
}

#[rstest]
fn status_before_the_first_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "s".to_string()));
    write_file(FileSpec::new(dir.join("other.txt"), "o".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();

    assert_eq!(
        twig_output(dir, &["status", "--porcelain"]),
        "A  staged.txt\n?? other.txt\n"
    );
}
