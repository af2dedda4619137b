use crate::common::command::{
    commit_file, current_branch, gitlet_add, gitlet_checkout_branch, init_repository_dir,
    run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_replaces_tracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    gitlet_checkout_branch(dir.path(), "feature")
        .assert()
        .success()
        .stdout("");
    assert_eq!(current_branch(dir.path()), "feature");
    commit_file(dir.path(), "a.txt", "feature a", "edit a");
    commit_file(dir.path(), "docs/guide.txt", "guide", "add guide");

    // a staged file survives the switch as an untracked file
    write_file(FileSpec::new(dir.path().join("wip.txt"), "wip".to_string()));
    gitlet_add(dir.path(), "wip.txt").assert().success();

    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success()
        .stdout("");

    assert_eq!(current_branch(dir.path()), "master");
    assert_eq!(read_file(&dir.path().join("a.txt")), "one");
    assert!(!dir.path().join("docs").exists());
    assert_eq!(read_file(&dir.path().join("wip.txt")), "wip");
    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\nfeature\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\nwip.txt\n\n",
        );

    std::fs::remove_file(dir.path().join("wip.txt"))?;
    gitlet_checkout_branch(dir.path(), "feature")
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("a.txt")), "feature a");
    assert_eq!(read_file(&dir.path().join("docs/guide.txt")), "guide");

    Ok(())
}
