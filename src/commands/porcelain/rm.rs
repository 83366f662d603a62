use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Unstage a pending addition and/or schedule a tracked file's removal
    ///
    /// A tracked file is also deleted from the working directory right
    /// away; the staged entry alone would only take effect at commit time.
    pub fn rm(&self, file_name: &str) -> anyhow::Result<()> {
        let unstaged = self.staging().unstage_add(file_name)?;

        let head_commit = self.head_commit()?;
        let tracked_blob_id = head_commit.tree().get(file_name);
        if let Some(blob_id) = tracked_blob_id {
            self.staging().record_remove(file_name, blob_id)?;
            self.workspace().remove_file(file_name)?;
        }

        if !unstaged && tracked_blob_id.is_none() {
            return Err(GitletError::NothingToRemove.into());
        }

        Ok(())
    }
}
