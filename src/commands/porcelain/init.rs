use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;

impl Repository {
    /// Create the repository layout and the bootstrap commit
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        std::fs::create_dir_all(self.gitlet_path())?;
        self.database().create_layout()?;
        self.staging().create_layout()?;
        self.refs().create_layout()?;

        let bootstrap = Commit::bootstrap();
        self.database().store_commit(&bootstrap)?;
        self.refs().write_branch(DEFAULT_BRANCH, bootstrap.object_id())?;
        self.refs().write_head(DEFAULT_BRANCH)?;

        Ok(())
    }
}
