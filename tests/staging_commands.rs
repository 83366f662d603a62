use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

/// Blob id of the content `A` (sha1)
const BLOB_A: &str = "6dcd4ce23d88e2ee9568ba546c007c63d9131c1b";

#[rstest]
fn add_stores_the_blob_and_stages_the_file(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "A".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let gitlet = repository_dir.path().join(".gitlet");
    assert!(gitlet.join("objects").join("blobs").join(BLOB_A).is_file());
    assert_eq!(
        std::fs::read_to_string(gitlet.join("staging").join("add").join("a.txt")).unwrap(),
        BLOB_A
    );
}

#[rstest]
fn add_of_a_missing_file_is_rejected(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist.\n"));
}

#[rstest]
fn re_adding_head_identical_content_unstages_the_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    // diverge, stage, then restore the committed content
    write_file(FileSpec::new(dir.path().join("a.txt"), "changed".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "A".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let add_dir = dir.path().join(".gitlet").join("staging").join("add");
    assert!(!add_dir.join("a.txt").exists());
}

#[rstest]
fn commit_tracks_staged_files_and_advances_master(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first = common::command::read_branch_ref(dir.path(), "master");

    write_file(FileSpec::new(dir.path().join("b.txt"), "B".to_string()));
    run_gitlet_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "c2"])
        .assert()
        .success();

    let second = common::command::read_branch_ref(dir.path(), "master");
    assert_ne!(first, second);

    // staging is cleared by the commit
    let staging = dir.path().join(".gitlet").join("staging");
    assert_eq!(staging.join("add").read_dir().unwrap().count(), 0);
    assert_eq!(staging.join("remove").read_dir().unwrap().count(), 0);
}

#[rstest]
fn commit_with_empty_message_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B".to_string()));
    run_gitlet_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["commit", ""])
        .assert()
        .success()
        .stdout(predicate::eq("Please enter a commit message.\n"));
}

#[rstest]
fn commit_without_staged_changes_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_gitlet_command(dir.path(), &["commit", "nothing"])
        .assert()
        .success()
        .stdout(predicate::eq("No changes added to the commit.\n"));
}

#[rstest]
fn rm_of_an_untracked_unstaged_file_is_rejected(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["rm", "foo"])
        .assert()
        .success()
        .stdout(predicate::eq("No reason to remove the file.\n"));
}

#[rstest]
fn rm_of_a_tracked_file_deletes_it_and_schedules_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("a.txt").exists());
    assert!(
        dir.path()
            .join(".gitlet")
            .join("staging")
            .join("remove")
            .join("a.txt")
            .is_file()
    );

    run_gitlet_command(dir.path(), &["commit", "drop a.txt"])
        .assert()
        .success();

    // the next snapshot no longer tracks the file: rm again has no target
    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("No reason to remove the file.\n"));
}

#[rstest]
fn rm_of_a_staged_only_file_just_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    run_gitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["rm", "new.txt"])
        .assert()
        .success();

    // unstaged but not deleted from the working tree
    assert!(dir.path().join("new.txt").is_file());
    assert!(
        !dir.path()
            .join(".gitlet")
            .join("staging")
            .join("add")
            .join("new.txt")
            .exists()
    );
}
