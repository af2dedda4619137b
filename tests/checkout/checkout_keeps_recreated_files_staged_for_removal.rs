use crate::common::command::{
    branch_commit_id, commit_file, gitlet_checkout_branch, init_repository_dir,
    run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

const IN_THE_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.\n";

#[rstest]
fn checkout_keeps_recreated_files_staged_for_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    gitlet_checkout_branch(dir.path(), "other")
        .assert()
        .success();
    commit_file(dir.path(), "a.txt", "two", "edit a");
    let other = branch_commit_id(dir.path(), "other");
    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "precious".to_string()));

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicates::str::ends_with(
            "=== Untracked Files ===\na.txt\n\n",
        ));

    gitlet_checkout_branch(dir.path(), "other")
        .assert()
        .success()
        .stdout(IN_THE_WAY);
    run_gitlet_command(dir.path(), &["reset", other.as_str()])
        .assert()
        .success()
        .stdout(IN_THE_WAY);

    assert_eq!(read_file(&dir.path().join("a.txt")), "precious");
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".gitlet/HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}
