//! Filesystem-peer synchronization plumbing
//!
//! A remote is a path to another repository's metadata directory. Peers are
//! opened through the same object-store and ref-store components as the
//! local repository; the frontier of commits is copied object by object,
//! skipping anything the receiving side already has.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::dag::walker::{DagWalker, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use std::path::Path;

/// Object database directory name inside a metadata directory
const DATABASE_DIR: &str = "objects";

/// A peer repository reachable through the local filesystem
pub struct Peer {
    database: Database,
    refs: Refs,
}

impl Peer {
    /// Open a peer rooted at its metadata directory
    pub fn open(metadata_path: &Path) -> Self {
        Peer {
            database: Database::new(metadata_path.join(DATABASE_DIR).into_boxed_path()),
            refs: Refs::new(metadata_path.to_path_buf().into_boxed_path()),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// DAG walker over the peer's commit store
    pub fn dag(&self) -> DagWalker<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        DagWalker::new(move |oid| Ok(SlimCommit::from(&self.database.load_commit(oid)?)))
    }
}

/// Copy a set of commits and their tree blobs between object stores
///
/// A commit already present at the target is skipped wholesale, blobs
/// included.
pub fn transfer_objects(
    ids: &HashSet<ObjectId>,
    source: &Database,
    target: &Database,
) -> anyhow::Result<()> {
    for oid in ids {
        if target.commit_exists(oid) {
            continue;
        }

        let commit = source.load_commit(oid)?;
        target.store_commit(&commit)?;

        for blob_id in commit.tree().values() {
            if !target.blob_exists(blob_id) {
                target.store_blob(&source.load_blob(blob_id)?)?;
            }
        }
    }

    Ok(())
}
