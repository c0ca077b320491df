use crate::common::command::{
    get_head_commit_sha, repository_dir, repository_with_multiple_commits, run_twig_command,
    twig_output,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_branches_in_name_order(repository_with_multiple_commits: TempDir) {
    let repository_dir = repository_with_multiple_commits;
    for name in ["zeta", "alpha", "mid/one"] {
        run_twig_command(repository_dir.path(), &["branch", name])
            .assert()
            .success();
    }

    assert_eq!(
        twig_output(repository_dir.path(), &["branch"]),
        "  alpha\n* master\n  mid/one\n  zeta\n"
    );
}

#[rstest]
fn list_branches_marks_the_checked_out_branch(repository_with_multiple_commits: TempDir) {
    let repository_dir = repository_with_multiple_commits;
    run_twig_command(repository_dir.path(), &["branch", "topic"])
        .assert()
        .success();
    run_twig_command(repository_dir.path(), &["checkout", "topic"])
        .assert()
        .success();

    assert_eq!(
        twig_output(repository_dir.path(), &["branch"]),
        "  master\n* topic\n"
    );
}

#[rstest]
fn list_branches_with_detached_head(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;
    let head = get_head_commit_sha(repository_dir.path())?;
    run_twig_command(repository_dir.path(), &["checkout", &head])
        .assert()
        .success();

    assert_eq!(
        twig_output(repository_dir.path(), &["branch"]),
        format!("* (HEAD detached at {})\n  master\n", &head[..7])
    );

    Ok(())
}

#[rstest]
fn list_branches_in_empty_repository(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(twig_output(repository_dir.path(), &["branch"]), "");
}
