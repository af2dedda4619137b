use crate::common::command::{gitlet_add, gitlet_commit, head_commit_id, init_repository_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
fn commit_requires_a_message(
    init_repository_dir: TempDir,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head_before = head_commit_id(dir.path());
    write_file(FileSpec::new(dir.path().join("a.txt"), "two".to_string()));
    gitlet_add(dir.path(), "a.txt").assert().success();

    gitlet_commit(dir.path(), message)
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    assert_eq!(head_commit_id(dir.path()), head_before);

    Ok(())
}
