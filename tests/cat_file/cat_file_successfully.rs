use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, get_head_commit_sha, init_repository_dir, run_twig_command,
    twig_output,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_blob_content_verbatim(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let content = "no trailing newline\n\twith a tab";
    write_file(FileSpec::new(dir.join("raw.txt"), content.to_string()));
    let oid = twig_output(dir, &["hash-object", "-w", "raw.txt"]);

    assert_eq!(twig_output(dir, &["cat-file", oid.trim()]), content);
    assert_eq!(twig_output(dir, &["cat-file", "-t", oid.trim()]), "blob\n");
}

#[rstest]
fn print_object_by_abbreviated_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = twig_output(dir, &["hash-object", "1.txt"]);

    assert_eq!(twig_output(dir, &["cat-file", &oid[..6]]), "one");
}

#[rstest]
fn print_commit_and_tree(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    let tree = twig_output(dir, &["write-tree"]);
    let tree = tree.trim();

    assert_eq!(
        twig_output(dir, &["cat-file", "HEAD"]),
        format!(
            "tree {tree}\n\
            author {AUTHOR_NAME} <{AUTHOR_EMAIL}> 1672574400 +0000\n\
            committer {AUTHOR_NAME} <{AUTHOR_EMAIL}> 1672574400 +0000\n\
            \n\
            Initial commit\n"
        )
    );
    assert_eq!(twig_output(dir, &["cat-file", "-t", &head]), "commit\n");
    assert_eq!(twig_output(dir, &["cat-file", "-t", tree]), "tree\n");

    let one = twig_output(dir, &["hash-object", "1.txt"]);
    let listing = twig_output(dir, &["cat-file", tree]);
    assert!(listing.starts_with(&format!("100644 blob {}\t1.txt\n040000 tree ", one.trim())));
    assert!(listing.ends_with("\ta\n"));

    Ok(())
}

#[rstest]
#[case::unknown("0123456789abcdef")]
#[case::not_hex("zzzz")]
#[case::too_short("abc")]
fn print_unknown_object_fails(init_repository_dir: TempDir, #[case] object: &str) {
    run_twig_command(init_repository_dir.path(), &["cat-file", object])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}
