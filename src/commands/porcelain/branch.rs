use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Create a branch pointing at the current commit; HEAD stays put
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(branch_name) {
            return Err(GitletError::BranchExists.into());
        }

        self.refs().write_branch(branch_name, &self.head_oid()?)
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            return Err(GitletError::NoSuchBranch.into());
        }
        if branch_name == self.current_branch()? {
            return Err(GitletError::DeletingCurrent.into());
        }

        self.refs().delete_branch(branch_name)
    }
}
