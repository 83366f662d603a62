//! Object database
//!
//! The database stores all repository objects using content-addressable
//! storage in two flat namespaces:
//!
//! - Blobs: `objects/blobs/<id>`, the raw file bytes
//! - Commits: `objects/commits/<id>`, the serialized commit record
//!
//! Writes are idempotent: storing an already-present fingerprint is a
//! no-op. Each object file is written to a temporary sibling and renamed
//! into place.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Commit namespace directory name
const COMMITS_DIR: &str = "commits";

/// Blob namespace directory name
const BLOBS_DIR: &str = "blobs";

/// Content-addressed object store
///
/// Rooted at the repository's `objects` directory. Peer repositories are
/// accessed through a second instance rooted at the peer's layout.
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (typically `.gitlet/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the namespace directories (used by `init`)
    pub fn create_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.path.join(COMMITS_DIR))?;
        std::fs::create_dir_all(self.path.join(BLOBS_DIR))?;

        Ok(())
    }

    /// Store a blob; returns its fingerprint
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id();
        let blob_path = self.blob_path(&oid);

        if !blob_path.exists() {
            self.write_object(blob_path, blob.data().clone())?;
        }

        Ok(oid)
    }

    pub fn blob_exists(&self, oid: &ObjectId) -> bool {
        self.blob_path(oid).exists()
    }

    /// Load a blob; a missing object is an internal invariant violation
    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let blob_path = self.blob_path(oid);
        let content = std::fs::read(&blob_path)
            .with_context(|| format!("Missing blob object {}", oid))?;

        Ok(Blob::new(content.into()))
    }

    /// Store a commit under its id; a no-op if already present
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let commit_path = self.commit_path(commit.object_id());

        if !commit_path.exists() {
            self.write_object(commit_path, commit.serialize()?)?;
        }

        Ok(())
    }

    pub fn commit_exists(&self, oid: &ObjectId) -> bool {
        self.commit_path(oid).exists()
    }

    /// Load a commit; a missing object is an internal invariant violation
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let commit_path = self.commit_path(oid);
        let content = std::fs::read(&commit_path)
            .with_context(|| format!("Missing commit object {}", oid))?;

        Commit::deserialize(Cursor::new(content))
            .with_context(|| format!("Corrupt commit object {}", oid))
    }

    /// Resolve a hexadecimal prefix to the unique matching commit id
    pub fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self
            .all_commit_ids()?
            .into_iter()
            .filter(|oid| oid.matches_prefix(prefix));

        match (matches.next(), matches.next()) {
            (None, _) => Err(GitletError::NoSuchCommit.into()),
            (Some(oid), None) => Ok(oid),
            (Some(_), Some(_)) => Err(GitletError::AmbiguousPrefix.into()),
        }
    }

    /// Enumerate every commit id in the store, sorted
    pub fn all_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.path.join(COMMITS_DIR);
        let mut ids = std::fs::read_dir(&commits_path)
            .with_context(|| format!("Unable to list commit objects in {:?}", commits_path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        ids.sort();

        Ok(ids)
    }

    fn blob_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(BLOBS_DIR).join(oid.as_ref())
    }

    fn commit_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(COMMITS_DIR).join(oid.as_ref())
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make the write atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
