use crate::common::command::{
    get_head_commit_sha, init_repository_dir, repository_dir, run_twig_command, twig_output,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn clean_working_tree(init_repository_dir: TempDir) {
    assert_eq!(
        twig_output(init_repository_dir.path(), &["status"]),
        "On branch master\n\nnothing to commit, working tree clean\n"
    );
}

#[rstest]
fn fresh_repository(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        twig_output(repository_dir.path(), &["status"]),
        "On branch master\n\nNo commits yet\n\nnothing to commit, working tree clean\n"
    );
}

#[rstest]
fn every_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    write_file(FileSpec::new(dir.join("nested").join("x.txt"), "x".to_string()));

    assert_eq!(
        twig_output(dir, &["status"]),
        "On branch master\n\
        \n\
        Changes to be committed:\n        new file:   new.txt\n\
        \n\
        Changes not staged for commit:\n        modified:   1.txt\n\
        \n\
        Untracked files:\n\tnested/\n\
        \n"
    );
}

#[rstest]
#[case::unstaged("1.txt", "no changes added to commit\n")]
#[case::untracked("other.txt", "nothing added to commit but untracked files present\n")]
fn hint_without_staged_changes(
    init_repository_dir: TempDir,
    #[case] file: &str,
    #[case] hint: &str,
) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join(file), "changed".to_string()));

    let output = twig_output(dir, &["status"]);

    assert!(output.ends_with(hint), "unexpected status output:\n{output}");
}

#[rstest]
fn detached_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    run_twig_command(dir, &["checkout", &head]).assert().success();

    assert_eq!(
        twig_output(dir, &["status"]),
        format!(
            "HEAD detached at {}\n\nnothing to commit, working tree clean\n",
            &head[..7]
        )
    );

    Ok(())
}
