use crate::common::command::{init_repository_dir, repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn staged_new_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "fresh\n".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();
    let oid = twig_output(dir, &["hash-object", "new.txt"]);

    let expected = format!(
        "diff --git a/new.txt b/new.txt\n\
        new file mode 100644\n\
        index 0000000..{}\n\
        --- /dev/null\n\
        +++ b/new.txt\n\
        @@ -0,0 +1,1 @@\n\
        +fresh\n",
        &oid[..7]
    );

    assert_eq!(twig_output(dir, &["diff", "--cached"]), expected);
    assert_eq!(twig_output(dir, &["diff", "--staged"]), expected);
    assert_eq!(twig_output(dir, &["diff"]), "");
}

#[rstest]
fn staged_deletion_and_modification(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    delete_path(&dir.join("a").join("b"));
    run_twig_command(dir, &["add", "."]).assert().success();

    let output = twig_output(dir, &["diff", "--cached"]);
    let headers = output
        .lines()
        .filter(|line| line.starts_with("diff --git"))
        .collect::<Vec<_>>();

    assert_eq!(
        headers,
        vec![
            "diff --git a/1.txt b/1.txt",
            "diff --git a/a/b/3.txt b/a/b/3.txt"
        ]
    );
    assert!(output.contains("@@ -1,1 +1,1 @@\n-one\n+uno\n"));
    assert!(output.contains("deleted file mode 100644\n"));
    assert!(output.ends_with("@@ -1,1 +0,0 @@\n-three\n"));
}

#[rstest]
fn unstaged_changes_are_not_shown(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));

    assert_eq!(twig_output(dir, &["diff", "--cached"]), "");
}

#[rstest]
fn cached_diff_before_the_first_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("first.txt"), "first".to_string()));
    run_twig_command(dir, &["add", "."]).assert().success();

    let output = twig_output(dir, &["diff", "--cached"]);

    assert!(output.starts_with("diff --git a/first.txt b/first.txt\nnew file mode 100644\n"));
    assert!(output.ends_with("+first\n"));
}
