use crate::common::command::{commit_file, head_commit_id, init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn find_commits_by_message(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    commit_file(dir.path(), "b.txt", "bee", "repeat");
    let first = head_commit_id(dir.path());
    commit_file(dir.path(), "c.txt", "sea", "repeat");
    let second = head_commit_id(dir.path());

    let mut expected = [first, second];
    expected.sort();

    run_gitlet_command(dir.path(), &["find", "repeat"])
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", expected[0], expected[1]));

    run_gitlet_command(dir.path(), &["find", "missing"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");

    Ok(())
}
