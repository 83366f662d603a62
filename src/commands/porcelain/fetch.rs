use crate::areas::repository::Repository;
use crate::artifacts::sync::{self, Peer};
use crate::errors::GitletError;

impl Repository {
    /// Copy a peer branch's history into the local store
    ///
    /// Advances the remote-tracking ref `<remote>/<branch>`; the working
    /// tree and HEAD are untouched.
    pub fn fetch(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote_path = self
            .refs()
            .read_remote(remote_name)?
            .ok_or(GitletError::NoSuchRemote)?;
        if !remote_path.is_dir() {
            return Err(GitletError::RemoteMissing.into());
        }

        let peer = Peer::open(&remote_path);
        let remote_oid = peer
            .refs()
            .read_branch(branch_name)?
            .ok_or(GitletError::NoSuchRemoteBranch)?;

        let local_head_oid = self.head_oid()?;
        let frontier = peer.dag().frontier(&local_head_oid, &remote_oid)?;
        sync::transfer_objects(&frontier, peer.database(), self.database())?;

        self.refs().write_branch(
            &format!("{}/{}", remote_name, branch_name),
            &remote_oid,
        )
    }
}
