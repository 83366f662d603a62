use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Stage one working file for addition
    ///
    /// The blob is stored immediately; the staging entry is withdrawn again
    /// when the content matches what the current commit already tracks.
    pub fn add(&self, file_name: &str) -> anyhow::Result<()> {
        if !self.workspace().contains(file_name) {
            return Err(GitletError::FileAbsent.into());
        }

        let blob = self.workspace().parse_blob(file_name)?;
        let blob_id = self.database().store_blob(&blob)?;

        let head_commit = self.head_commit()?;
        let head_blob_id = head_commit.tree().get(file_name);

        self.staging().record_add(file_name, &blob_id, head_blob_id)
    }
}
