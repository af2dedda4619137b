use crate::common::command::{gitlet_add, gitlet_commit, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn restaging_committed_content_leaves_nothing_pending(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    // stage a change, then revert the file and stage it again
    write_file(FileSpec::new(dir.path().join("a.txt"), "two".to_string()));
    gitlet_add(dir.path(), "a.txt").assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "one".to_string()));
    gitlet_add(dir.path(), "a.txt").assert().success();

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );

    gitlet_commit(dir.path(), "unchanged")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    Ok(())
}
