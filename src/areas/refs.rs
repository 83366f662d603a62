//! References (branches, HEAD, remote descriptors)
//!
//! References are human-readable names pointing at commits or peers:
//!
//! - HEAD: `.gitlet/HEAD`, the name of the current branch. It always holds
//!   a branch name (possibly a remote-tracking `<remote>/<branch>` name),
//!   never a raw commit id.
//! - Local branches: `refs/heads/<branch>`, a commit id per file.
//! - Remote-tracking branches: `refs/remotes/<remote>/<branch>`.
//! - Remote descriptors: `remote/<name>`, the filesystem path of a peer's
//!   metadata directory.
//!
//! A branch name containing `/` is resolved in the remote-tracking
//! namespace, otherwise in the local one.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD reference file
const HEAD_FILE: &str = "HEAD";

/// Name of the default branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Reference manager
///
/// Rooted at the repository's metadata directory. Peer repositories are
/// accessed through a second instance rooted at the peer's layout.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Create the refs directories (used by `init`)
    pub fn create_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.heads_path())?;
        std::fs::create_dir_all(self.remotes_path())?;
        std::fs::create_dir_all(self.remote_descriptors_path())?;

        Ok(())
    }

    /// Read the current branch name out of HEAD
    pub fn read_head(&self) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| format!("Unable to read HEAD in {:?}", self.path))?;

        Ok(content.trim().to_string())
    }

    /// Point HEAD at the given branch name
    pub fn write_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), branch_name)
    }

    /// Read the commit id a branch points at; `None` if the branch is absent
    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read branch ref {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Advance a branch to the given commit, creating the ref if absent
    pub fn write_branch(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref())
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Delete a branch ref file; existence is the caller's concern
    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch ref {:?}", branch_path))
    }

    /// List all branch names, local first-level and remote-tracking
    /// qualified, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();

        for base in [self.heads_path(), self.remotes_path()] {
            for entry in WalkDir::new(&base)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
            {
                let relative = entry
                    .path()
                    .strip_prefix(&base)
                    .context("ref path outside its namespace")?;
                names.push(relative.to_string_lossy().to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    /// Register a remote descriptor; existence is the caller's concern
    pub fn add_remote(&self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        std::fs::write(self.remote_descriptor_path(remote_name), remote_path)
            .with_context(|| format!("Unable to write remote descriptor {}", remote_name))?;
        std::fs::create_dir_all(self.remotes_path().join(remote_name))?;

        Ok(())
    }

    pub fn remove_remote(&self, remote_name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.remote_descriptor_path(remote_name))
            .with_context(|| format!("Unable to delete remote descriptor {}", remote_name))
    }

    pub fn remote_exists(&self, remote_name: &str) -> bool {
        self.remote_descriptor_path(remote_name).is_file()
    }

    /// Read the peer path a remote descriptor holds
    pub fn read_remote(&self, remote_name: &str) -> anyhow::Result<Option<PathBuf>> {
        let descriptor_path = self.remote_descriptor_path(remote_name);
        if !descriptor_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&descriptor_path)
            .with_context(|| format!("Unable to read remote descriptor {}", remote_name))?;

        Ok(Some(PathBuf::from(content.trim())))
    }

    /// Write a ref file under an exclusive lock
    fn update_ref_file(&self, path: PathBuf, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Resolve a branch name to its ref file path
    ///
    /// `<remote>/<branch>` names live in the remote-tracking namespace,
    /// flat names in the local one.
    fn branch_path(&self, branch_name: &str) -> PathBuf {
        match branch_name.split_once('/') {
            Some((remote, branch)) => self.remotes_path().join(remote).join(branch),
            None => self.heads_path().join(branch_name),
        }
    }

    fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn remotes_path(&self) -> PathBuf {
        self.path.join("refs").join("remotes")
    }

    fn remote_descriptors_path(&self) -> PathBuf {
        self.path.join("remote")
    }

    fn remote_descriptor_path(&self, remote_name: &str) -> PathBuf {
        self.remote_descriptors_path().join(remote_name)
    }
}
