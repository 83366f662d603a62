use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one committed file `a.txt` containing `A`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "A".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["commit", "c1"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Read the commit id a branch ref file holds
pub fn read_branch_ref(dir: &Path, qualified_name: &str) -> String {
    let mut path = dir.join(".gitlet").join("refs");
    match qualified_name.split_once('/') {
        Some((remote, branch)) => path = path.join("remotes").join(remote).join(branch),
        None => path = path.join("heads").join(qualified_name),
    }

    std::fs::read_to_string(path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Read the branch name HEAD holds
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}
