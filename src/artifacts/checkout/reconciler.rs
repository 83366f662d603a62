//! Working-tree reconciler
//!
//! The untracked-file safety check is deliberately conservative for
//! checkout and merge: any working file the current commit does not track
//! aborts the operation, whether or not the target would touch it. Reset
//! uses the stricter content-comparing variant: an untracked file is safe
//! unless the target tracks the path with different bytes.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use derive_new::new;

#[derive(new)]
pub struct Reconciler<'r> {
    repository: &'r Repository,
}

impl<'r> Reconciler<'r> {
    /// Conservative untracked-file check used by checkout, merge, and pull
    pub fn assert_no_untracked(&self) -> anyhow::Result<()> {
        let head_tree = self.repository.head_commit()?.tree().clone();

        for file_name in self.repository.workspace().list_files()? {
            if !head_tree.contains_key(&file_name) {
                return Err(GitletError::UntrackedOverwrite.into());
            }
        }

        Ok(())
    }

    /// Content-comparing untracked-file check used by reset
    ///
    /// An untracked working file only blocks the reset when the target
    /// commit tracks the same path with different content.
    pub fn assert_no_untracked_for_reset(&self, target: &Commit) -> anyhow::Result<()> {
        let head_tree = self.repository.head_commit()?.tree().clone();

        for file_name in self.repository.workspace().list_files()? {
            if head_tree.contains_key(&file_name) {
                continue;
            }

            if let Some(target_blob) = target.tree().get(&file_name) {
                let working_blob = self.repository.workspace().parse_blob(&file_name)?;
                if &working_blob.object_id() != target_blob {
                    return Err(GitletError::UntrackedOverwrite.into());
                }
            }
        }

        Ok(())
    }

    /// Write every file of the target tree into the working directory
    pub fn materialize(&self, target: &Commit) -> anyhow::Result<()> {
        for (file_name, blob_id) in target.tree() {
            let blob = self.repository.database().load_blob(blob_id)?;
            self.repository.workspace().write_file(file_name, blob.data())?;
        }

        Ok(())
    }

    /// Delete working files the target tree does not track
    pub fn prune(&self, target: &Commit) -> anyhow::Result<()> {
        for file_name in self.repository.workspace().list_files()? {
            if !target.tree().contains_key(&file_name) {
                self.repository.workspace().remove_file(&file_name)?;
            }
        }

        Ok(())
    }

    /// Overwrite a single working file from a commit's tree
    ///
    /// Touches neither HEAD nor the staging area.
    pub fn restore_file(&self, source: &Commit, file_name: &str) -> anyhow::Result<()> {
        let blob_id = source
            .tree()
            .get(file_name)
            .ok_or(GitletError::FileNotInCommit)?;
        let blob = self.repository.database().load_blob(blob_id)?;

        self.repository.workspace().write_file(file_name, blob.data())
    }
}
