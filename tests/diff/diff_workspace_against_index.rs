use crate::common::command::{init_repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn blob_oid(dir: &std::path::Path, file: &str) -> String {
    twig_output(dir, &["hash-object", file]).trim().to_string()
}

#[rstest]
fn no_changes_no_output(init_repository_dir: TempDir) {
    assert_eq!(twig_output(init_repository_dir.path(), &["diff"]), "");
}

#[rstest]
fn modified_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let old_oid = blob_oid(dir, "1.txt");
    write_file(FileSpec::new(dir.join("1.txt"), "one\nand more\n".to_string()));
    let new_oid = blob_oid(dir, "1.txt");

    assert_eq!(
        twig_output(dir, &["diff"]),
        format!(
            "diff --git a/1.txt b/1.txt\n\
            index {}..{} 100644\n\
            --- a/1.txt\n\
            +++ b/1.txt\n\
            @@ -1,1 +1,2 @@\n\
            \x20one\n\
            +and more\n",
            &old_oid[..7],
            &new_oid[..7]
        )
    );
}

#[rstest]
fn hunks_keep_three_lines_of_context(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let lines = (1..=12).map(|n| format!("line {n}\n")).collect::<String>();
    write_file(FileSpec::new(dir.join("long.txt"), lines.clone()));
    run_twig_command(dir, &["add", "long.txt"]).assert().success();

    let edited = lines
        .replace("line 2\n", "line two\n")
        .replace("line 11\n", "line eleven\n");
    write_file(FileSpec::new(dir.join("long.txt"), edited));

    let output = twig_output(dir, &["diff"]);
    let hunks = output
        .lines()
        .filter(|line| line.starts_with("@@"))
        .collect::<Vec<_>>();

    assert_eq!(hunks, vec!["@@ -1,5 +1,5 @@", "@@ -8,5 +8,5 @@"]);
    assert!(output.contains("\n-line 2\n+line two\n line 3\n"));
    assert!(output.ends_with(" line 10\n-line 11\n+line eleven\n line 12\n"));
}

#[rstest]
fn deleted_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = blob_oid(dir, "1.txt");
    delete_path(&dir.join("1.txt"));

    assert_eq!(
        twig_output(dir, &["diff"]),
        format!(
            "diff --git a/1.txt b/1.txt\n\
            deleted file mode 100644\n\
            index {}..0000000\n\
            --- a/1.txt\n\
            +++ /dev/null\n\
            @@ -1,1 +0,0 @@\n\
            -one\n",
            &oid[..7]
        )
    );
}

#[cfg(unix)]
#[rstest]
fn mode_change_without_content_change(init_repository_dir: TempDir) {
    use crate::common::file::make_executable;

    let dir = init_repository_dir.path();
    make_executable(&dir.join("a").join("2.txt"));

    assert_eq!(
        twig_output(dir, &["diff"]),
        "diff --git a/a/2.txt b/a/2.txt\nold mode 100644\nnew mode 100755\n"
    );
}

#[rstest]
fn untracked_files_are_ignored(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));

    assert_eq!(twig_output(dir, &["diff"]), "");
}
