use crate::common::command::{gitlet_checkout_branch, init_repository_dir};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case("master", "No need to checkout the current branch.\n")]
#[case("nowhere", "No such branch exists.\n")]
#[case("bad..name", "No such branch exists.\n")]
fn checkout_branch_errors(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] expected: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    gitlet_checkout_branch(init_repository_dir.path(), branch)
        .assert()
        .success()
        .stdout(expected.to_string());

    Ok(())
}
