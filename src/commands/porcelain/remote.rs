use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Register a peer repository under a name
    pub fn add_remote(&self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        if self.refs().remote_exists(remote_name) {
            return Err(GitletError::RemoteExists.into());
        }

        self.refs().add_remote(remote_name, remote_path)
    }

    /// Forget a peer; its remote-tracking branches are left behind
    pub fn rm_remote(&self, remote_name: &str) -> anyhow::Result<()> {
        if !self.refs().remote_exists(remote_name) {
            return Err(GitletError::NoSuchRemote.into());
        }

        self.refs().remove_remote(remote_name)
    }
}
