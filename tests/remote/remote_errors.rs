use super::{add_origin, init_repository};
use crate::common::command::{commit_file, head_commit_id, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn add_remote_twice_is_refused(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    add_origin(&local, "elsewhere");

    run_gitlet_command(&local, &["add-remote", "origin", "../other/.gitlet"])
        .assert()
        .success()
        .stdout("A remote with that name already exists.\n");
}

#[rstest]
fn remove_remote_forgets_it(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    add_origin(&local, "elsewhere");

    run_gitlet_command(&local, &["rm-remote", "origin"])
        .assert()
        .success()
        .stdout("");
    run_gitlet_command(&local, &["rm-remote", "origin"])
        .assert()
        .success()
        .stdout("A remote with that name does not exist.\n");
}

#[rstest]
fn missing_remote_directory_is_reported(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    commit_file(&local, "a.txt", "alpha", "add a");
    add_origin(&local, "nowhere");

    for verb in ["push", "fetch", "pull"] {
        run_gitlet_command(&local, &[verb, "origin", "master"])
            .assert()
            .success()
            .stdout("Remote directory not found.\n");
    }
}

#[rstest]
fn fetching_a_missing_branch_is_reported(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    init_repository(&repository_dir, "remote");
    add_origin(&local, "remote");

    run_gitlet_command(&local, &["fetch", "origin", "nope"])
        .assert()
        .success()
        .stdout("That remote does not have that branch.\n");
}

#[rstest]
fn fetch_into_a_clashing_local_branch_copies_nothing(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    let remote = init_repository(&repository_dir, "remote");
    commit_file(&remote, "a.txt", "alpha", "remote work");
    let remote_head = head_commit_id(&remote);
    add_origin(&local, "remote");
    run_gitlet_command(&local, &["branch", "origin"])
        .assert()
        .success();

    for verb in ["fetch", "pull"] {
        run_gitlet_command(&local, &[verb, "origin", "master"])
            .assert()
            .success()
            .stdout("Invalid branch name: origin/master\n");
    }

    run_gitlet_command(&local, &["checkout", remote_head.as_str(), "--", "a.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
