use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, read_head_file, repository_with_multiple_commits,
    run_twig_command, twig_output,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn detach_head_at_a_parent_commit(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let head = get_head_commit_sha(dir)?;
    let parent = get_parent_commit_id(dir, &head).unwrap();

    run_twig_command(dir, &["checkout", "HEAD^"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Note: switching to 'HEAD^'."))
        .stdout(predicate::str::contains("You are in 'detached HEAD' state."))
        .stdout(predicate::str::ends_with(format!(
            "HEAD is now at {} Third commit\n",
            &parent[..7]
        )));

    assert_eq!(read_head_file(dir), format!("{parent}\n"));
    assert!(!dir.join("file4.txt").exists());
    assert!(dir.join("file3.txt").exists());
    assert_eq!(twig_output(dir, &["status", "--porcelain"]), "");

    Ok(())
}

#[rstest]
fn move_between_detached_commits(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let head = get_head_commit_sha(dir)?;
    let parent = get_parent_commit_id(dir, &head).unwrap();
    let grandparent = get_parent_commit_id(dir, &parent).unwrap();

    run_twig_command(dir, &["checkout", &parent]).assert().success();

    run_twig_command(dir, &["checkout", &grandparent[..8]])
        .assert()
        .success()
        .stdout(format!(
            "Previous HEAD position was {} Third commit\nHEAD is now at {} Second commit\n",
            &parent[..7],
            &grandparent[..7]
        ));

    assert_eq!(read_head_file(dir), format!("{grandparent}\n"));
    assert!(!dir.join("file3.txt").exists());

    Ok(())
}

#[rstest]
fn reattach_head_to_a_branch(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let head = get_head_commit_sha(dir)?;
    let parent = get_parent_commit_id(dir, &head).unwrap();
    run_twig_command(dir, &["checkout", "@~1"]).assert().success();

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout(format!(
            "Previous HEAD position was {} Third commit\nSwitched to branch 'master'\n",
            &parent[..7]
        ));

    assert_eq!(read_head_file(dir), "ref: refs/heads/master\n");
    assert!(dir.join("file4.txt").exists());

    Ok(())
}

#[rstest]
fn checkout_an_unknown_revision_fails(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits.path();

    run_twig_command(dir, &["checkout", "nowhere"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "unknown revision or reference 'nowhere'",
        ));

    assert_eq!(read_head_file(dir), "ref: refs/heads/master\n");
}
