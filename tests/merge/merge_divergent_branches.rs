use crate::common::command::{
    branch_commit_id, commit_file, gitlet_checkout_branch, gitlet_merge, repository_dir,
    run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///          A (keep, left, right, gone)
///         / \
///  master B   C feature
///
/// B edits `left` and adds `mine`; C edits `right`, removes `gone` and adds `theirs`.
#[rstest]
fn merge_divergent_branches(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();
    commit_file(dir.path(), "keep.txt", "keep", "keep");
    commit_file(dir.path(), "left.txt", "initial", "left");
    commit_file(dir.path(), "right.txt", "initial", "right");
    commit_file(dir.path(), "gone.txt", "doomed", "A");
    run_gitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir.path(), "left.txt", "master edit", "B1");
    commit_file(dir.path(), "mine.txt", "mine", "B2");
    let master_before = branch_commit_id(dir.path(), "master");

    gitlet_checkout_branch(dir.path(), "feature")
        .assert()
        .success();
    commit_file(dir.path(), "right.txt", "feature edit", "C1");
    run_gitlet_command(dir.path(), &["rm", "gone.txt"])
        .assert()
        .success();
    commit_file(dir.path(), "theirs.txt", "theirs", "C2");
    let feature = branch_commit_id(dir.path(), "feature");

    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();
    gitlet_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("keep.txt")), "keep");
    assert_eq!(read_file(&dir.path().join("left.txt")), "master edit");
    assert_eq!(read_file(&dir.path().join("right.txt")), "feature edit");
    assert_eq!(read_file(&dir.path().join("mine.txt")), "mine");
    assert_eq!(read_file(&dir.path().join("theirs.txt")), "theirs");
    assert!(!dir.path().join("gone.txt").exists());

    let merged = branch_commit_id(dir.path(), "master");
    assert_ne!(merged, master_before);
    assert_ne!(merged, feature);
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicates::str::contains(format!(
            "commit {}\nMerge: {} {}\n",
            merged,
            &master_before[..7],
            &feature[..7]
        )))
        .stdout(predicates::str::contains("Merged feature into master.\n"));

    // nothing left staged or modified after the merge commit
    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\nfeature\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );

    Ok(())
}
