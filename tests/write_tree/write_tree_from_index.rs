use crate::common::command::{init_repository_dir, repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

#[rstest]
fn tree_matches_the_committed_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let tree = twig_output(dir, &["write-tree"]);

    let commit = twig_output(dir, &["cat-file", "HEAD"]);
    assert_eq!(commit.lines().next(), Some(format!("tree {}", tree.trim()).as_str()));
    assert_eq!(twig_output(dir, &["cat-file", "-t", tree.trim()]), "tree\n");
}

#[rstest]
fn tree_follows_the_index_not_the_workspace(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let before = twig_output(dir, &["write-tree"]);

    write_file(FileSpec::new(dir.join("unstaged.txt"), "later".to_string()));
    assert_eq!(twig_output(dir, &["write-tree"]), before);

    run_twig_command(dir, &["add", "unstaged.txt"]).assert().success();
    let after = twig_output(dir, &["write-tree"]);
    assert_ne!(after, before);
    assert!(twig_output(dir, &["ls-tree", after.trim()]).contains("\tunstaged.txt\n"));
}

#[rstest]
fn empty_index_gives_the_empty_tree(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    assert_eq!(twig_output(dir, &["write-tree"]), format!("{EMPTY_TREE_OID}\n"));
    assert_eq!(twig_output(dir, &["ls-tree", EMPTY_TREE_OID]), "");
}
