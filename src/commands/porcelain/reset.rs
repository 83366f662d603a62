use crate::areas::repository::Repository;
use crate::artifacts::checkout::reconciler::Reconciler;

impl Repository {
    /// Move the current branch to an arbitrary commit and adopt its tree
    ///
    /// HEAD keeps naming the same branch; only the branch ref moves.
    pub fn reset(&self, prefix: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_prefix(prefix)?;
        let target = self.database().load_commit(&target_oid)?;
        let reconciler = Reconciler::new(self);

        reconciler.assert_no_untracked_for_reset(&target)?;
        reconciler.materialize(&target)?;
        self.refs()
            .write_branch(&self.current_branch()?, &target_oid)?;
        reconciler.prune(&target)?;
        self.staging().clear()
    }
}
