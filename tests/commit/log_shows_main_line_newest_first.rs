use crate::common::command::{commit_file, init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn log_shows_main_line_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    commit_file(dir.path(), "b.txt", "bee", "second");

    let entry = r"===\ncommit [0-9a-f]{40}\nDate: \w{3} \w{3} \d{1,2} \d{2}:\d{2}:\d{2} \d{4} [+-]\d{4}\n";
    let root = r"===\ncommit [0-9a-f]{40}\nDate: Thu Jan 1 00:00:00 1970 \+0000\ninitial commit\n\n";
    let expected = format!("^{entry}second\n\n{entry}first\n\n{root}$");

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(expected)?);

    Ok(())
}
