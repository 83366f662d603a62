use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    /// Snapshot the staging area on top of the current commit
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.commit_with_second_parent(message, None)
    }

    /// Commit with an optional second parent (set by merge)
    pub(crate) fn commit_with_second_parent(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        if message.is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }

        let added = self.staging().added()?;
        let removed = self.staging().removed()?;
        if added.is_empty() && removed.is_empty() {
            return Err(GitletError::NothingToCommit.into());
        }

        let head_commit = self.head_commit()?;
        let mut tree = head_commit.tree().clone();
        for (file_name, blob_id) in added {
            tree.insert(file_name, blob_id);
        }
        for file_name in removed.keys() {
            tree.remove(file_name);
        }

        let commit = Commit::new(
            message.to_string(),
            head_commit.object_id().clone(),
            second_parent,
            tree,
        );

        self.database().store_commit(&commit)?;
        self.refs()
            .write_branch(&self.current_branch()?, commit.object_id())?;
        self.staging().clear()
    }
}
