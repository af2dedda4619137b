use crate::common::command::{branch_commit_id, run_gitlet_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;

#[test]
fn root_commit_is_identical_across_repositories() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    run_gitlet_command(first.path(), &["init"]).assert().success();
    run_gitlet_command(second.path(), &["init"]).assert().success();

    assert_eq!(
        branch_commit_id(first.path(), "master"),
        branch_commit_id(second.path(), "master")
    );

    let root = branch_commit_id(first.path(), "master");
    run_gitlet_command(first.path(), &["log"])
        .assert()
        .success()
        .stdout(format!(
            "===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
            root
        ));

    Ok(())
}
