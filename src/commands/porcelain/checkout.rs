use crate::areas::repository::Repository;
use crate::artifacts::checkout::reconciler::Reconciler;
use crate::errors::GitletError;

impl Repository {
    /// Replace the working tree with a branch's head snapshot and move HEAD
    pub fn checkout_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let target_oid = self
            .refs()
            .read_branch(branch_name)?
            .ok_or(GitletError::NoSuchBranch)?;
        if branch_name == self.current_branch()? {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let target = self.database().load_commit(&target_oid)?;
        let reconciler = Reconciler::new(self);

        reconciler.assert_no_untracked()?;
        reconciler.materialize(&target)?;
        self.refs().write_head(branch_name)?;
        reconciler.prune(&target)?;
        self.staging().clear()
    }

    /// Restore one file from the current commit
    pub fn checkout_file(&self, file_name: &str) -> anyhow::Result<()> {
        let head_commit = self.head_commit()?;

        Reconciler::new(self).restore_file(&head_commit, file_name)
    }

    /// Restore one file from the commit named by a hex prefix
    pub fn checkout_commit_file(&self, prefix: &str, file_name: &str) -> anyhow::Result<()> {
        let oid = self.database().resolve_prefix(prefix)?;
        let source = self.database().load_commit(&oid)?;

        Reconciler::new(self).restore_file(&source, file_name)
    }
}
