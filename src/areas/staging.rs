//! Staging area
//!
//! The staging area records commit intent between snapshots as two disjoint
//! sets keyed by file name:
//!
//! - Add-set: `staging/add/<name>`, holding the blob id of the new content
//! - Remove-set: `staging/remove/<name>`, holding the blob id being removed
//!   (informational only)
//!
//! A name appears in at most one of the two sets at any observable state.
//! Entries are destroyed en masse by commit, checkout of a branch, and
//! reset.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Add-set directory name
const ADD_DIR: &str = "add";

/// Remove-set directory name
const REMOVE_DIR: &str = "remove";

/// Directory-backed staging area
#[derive(Debug, new)]
pub struct StagingArea {
    /// Path to the staging directory (typically `.gitlet/staging`)
    path: Box<Path>,
}

impl StagingArea {
    /// Create the add/remove directories (used by `init`)
    pub fn create_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.add_path())?;
        std::fs::create_dir_all(self.remove_path())?;

        Ok(())
    }

    /// Read the add-set, sorted by file name
    pub fn added(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        Self::read_entries(&self.add_path())
    }

    /// Read the remove-set, sorted by file name
    pub fn removed(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        Self::read_entries(&self.remove_path())
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.added()?.is_empty() && self.removed()?.is_empty())
    }

    /// Record an intent to add a file
    ///
    /// When the new content matches what the current commit already tracks,
    /// any pending add entry is withdrawn instead. In all cases the name
    /// leaves the remove-set.
    pub fn record_add(
        &self,
        file_name: &str,
        blob_id: &ObjectId,
        head_blob_id: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        if head_blob_id == Some(blob_id) {
            self.delete_entry(&self.add_path().join(file_name))?;
        } else {
            self.write_entry(&self.add_path().join(file_name), blob_id)?;
        }

        self.delete_entry(&self.remove_path().join(file_name))
    }

    /// Withdraw a pending add entry; returns whether one existed
    pub fn unstage_add(&self, file_name: &str) -> anyhow::Result<bool> {
        let entry_path = self.add_path().join(file_name);
        let existed = entry_path.is_file();
        self.delete_entry(&entry_path)?;

        Ok(existed)
    }

    /// Record an intent to remove a tracked file
    pub fn record_remove(&self, file_name: &str, blob_id: &ObjectId) -> anyhow::Result<()> {
        self.write_entry(&self.remove_path().join(file_name), blob_id)
    }

    /// Drop every pending entry
    pub fn clear(&self) -> anyhow::Result<()> {
        for dir in [self.add_path(), self.remove_path()] {
            for entry in std::fs::read_dir(&dir)
                .with_context(|| format!("Unable to list staging directory {:?}", dir))?
            {
                let entry = entry?;
                if entry.path().is_file() {
                    std::fs::remove_file(entry.path())?;
                }
            }
        }

        Ok(())
    }

    fn read_entries(dir: &Path) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        std::fs::read_dir(dir)
            .with_context(|| format!("Unable to list staging directory {:?}", dir))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                let content = std::fs::read_to_string(entry.path())?;
                let oid = ObjectId::try_parse(content.trim().to_string())?;

                Ok((name, oid))
            })
            .collect()
    }

    fn write_entry(&self, entry_path: &Path, blob_id: &ObjectId) -> anyhow::Result<()> {
        std::fs::write(entry_path, blob_id.as_ref())
            .with_context(|| format!("Unable to write staging entry {:?}", entry_path))
    }

    fn delete_entry(&self, entry_path: &Path) -> anyhow::Result<()> {
        if entry_path.is_file() {
            std::fs::remove_file(entry_path)
                .with_context(|| format!("Unable to delete staging entry {:?}", entry_path))?;
        }

        Ok(())
    }

    fn add_path(&self) -> PathBuf {
        self.path.join(ADD_DIR)
    }

    fn remove_path(&self) -> PathBuf {
        self.path.join(REMOVE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn staging_area() -> (TempDir, StagingArea) {
        let dir = TempDir::new().expect("temp dir");
        let staging = StagingArea::new(dir.path().join("staging").into_boxed_path());
        staging.create_layout().expect("staging layout");

        (dir, staging)
    }

    fn oid(content: &str) -> ObjectId {
        ObjectId::digest([content.as_bytes()])
    }

    #[test]
    fn test_add_and_remove_sets_stay_disjoint() {
        let (_dir, staging) = staging_area();

        staging.record_remove("a.txt", &oid("old")).unwrap();
        staging.record_add("a.txt", &oid("new"), None).unwrap();

        assert!(staging.added().unwrap().contains_key("a.txt"));
        assert!(!staging.removed().unwrap().contains_key("a.txt"));
    }

    #[test]
    fn test_adding_head_identical_content_withdraws_entry() {
        let (_dir, staging) = staging_area();
        let head = oid("same");

        staging.record_add("a.txt", &oid("changed"), Some(&head)).unwrap();
        staging.record_add("a.txt", &head, Some(&head)).unwrap();

        assert!(staging.is_empty().unwrap());
    }

    #[test]
    fn test_clear_empties_both_sets() {
        let (_dir, staging) = staging_area();

        staging.record_add("a.txt", &oid("a"), None).unwrap();
        staging.record_remove("b.txt", &oid("b")).unwrap();
        staging.clear().unwrap();

        assert!(staging.is_empty().unwrap());
    }

    #[test]
    fn test_unstage_add_reports_presence() {
        let (_dir, staging) = staging_area();

        staging.record_add("a.txt", &oid("a"), None).unwrap();

        assert!(staging.unstage_add("a.txt").unwrap());
        assert!(!staging.unstage_add("a.txt").unwrap());
    }
}
