use crate::areas::repository::Repository;
use crate::artifacts::checkout::reconciler::Reconciler;

impl Repository {
    /// Fetch a peer branch, then merge its remote-tracking ref
    pub fn pull(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        Reconciler::new(self).assert_no_untracked()?;
        self.fetch(remote_name, branch_name)?;
        self.merge(&format!("{}/{}", remote_name, branch_name))
    }
}
