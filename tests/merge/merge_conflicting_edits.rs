use crate::common::command::{
    commit_file, gitlet_checkout_branch, gitlet_merge, repository_dir, run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///       c1 (a = 1)
///      /  \
///    c3    c2
///  a = 3   a = 2
///  master  feat
#[rstest]
fn merge_conflicting_edits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();
    commit_file(dir.path(), "a", "1", "c1");
    run_gitlet_command(dir.path(), &["branch", "feat"])
        .assert()
        .success();
    gitlet_checkout_branch(dir.path(), "feat").assert().success();
    commit_file(dir.path(), "a", "2", "c2");
    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();
    commit_file(dir.path(), "a", "3", "c3");

    gitlet_merge(dir.path(), "feat")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.path().join("a")),
        "<<<<<<< HEAD\n3\n=======\n2\n>>>>>>>\n"
    );

    // the merge commit exists despite the conflict, with both parents
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicates::str::is_match(
            r"^===\ncommit [0-9a-f]{40}\nMerge: [0-9a-f]{7} [0-9a-f]{7}\nDate: .+\nMerged feat into master\.\n\n",
        )?);

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "=== Modifications Not Staged For Commit ===\n\n",
        ));

    Ok(())
}

/// Both branches add the same new file with different content
#[rstest]
fn merge_conflicting_additions(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();
    commit_file(dir.path(), "base.txt", "base", "base");
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_file(dir.path(), "f.txt", "ours\n", "ours");
    gitlet_checkout_branch(dir.path(), "other").assert().success();
    commit_file(dir.path(), "f.txt", "theirs\n", "theirs");
    // delete on one side, edit on the other
    commit_file(dir.path(), "base.txt", "edited", "edit base");
    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["rm", "base.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "drop base"])
        .assert()
        .success();

    gitlet_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.path().join("f.txt")),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );
    assert_eq!(
        read_file(&dir.path().join("base.txt")),
        "<<<<<<< HEAD\n=======\nedited\n>>>>>>>\n"
    );

    Ok(())
}
