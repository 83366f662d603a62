use crate::areas::repository::Repository;
use crate::artifacts::sync::{self, Peer};
use crate::errors::GitletError;
use anyhow::Context;

impl Repository {
    /// Append the current branch's commits onto a peer's branch
    ///
    /// Only fast-forwards are accepted: the peer's current commit must sit
    /// in the local history. The peer is left untouched otherwise.
    pub fn push(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote_path = self
            .refs()
            .read_remote(remote_name)?
            .ok_or(GitletError::NoSuchRemote)?;
        if !remote_path.is_dir() {
            return Err(GitletError::RemoteMissing.into());
        }

        let peer = Peer::open(&remote_path);

        // the peer's CURRENT commit, through its HEAD, regardless of which
        // branch is being pushed
        let peer_head_branch = peer.refs().read_head()?;
        let peer_head_oid = peer
            .refs()
            .read_branch(&peer_head_branch)?
            .with_context(|| {
                format!("peer HEAD branch {} does not resolve", peer_head_branch)
            })?;

        let local_head_oid = self.head_oid()?;
        if !self.dag().history_reaches(&local_head_oid, &peer_head_oid)? {
            return Err(GitletError::PushNotFastForward.into());
        }

        let frontier = self.dag().frontier(&peer_head_oid, &local_head_oid)?;
        sync::transfer_objects(&frontier, self.database(), peer.database())?;

        peer.refs().write_branch(branch_name, &local_head_oid)
    }
}
