//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! repository operations. It acts as a facade over the lower-level
//! components (database, staging, workspace, refs); the command
//! implementations in `commands::porcelain` are `impl Repository` blocks.
//!
//! All command output goes through the repository writer so the shell can
//! redirect it.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::dag::walker::{DagWalker, SlimCommit};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Metadata directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Staging area directory name
const STAGING_DIR: &str = "staging";

/// Gitlet repository
///
/// Coordinates all repository operations and provides access to the
/// database, staging area, workspace, and refs subsystems.
pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Object database
    database: Database,
    /// Staging area
    staging: StagingArea,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let database = Database::new(path.join(GITLET_DIR).join(DATABASE_DIR).into_boxed_path());
        let staging = StagingArea::new(path.join(GITLET_DIR).join(STAGING_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(GITLET_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            staging,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Name of the current branch (the HEAD value)
    pub fn current_branch(&self) -> anyhow::Result<String> {
        self.refs.read_head()
    }

    /// Commit id the current branch points at
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        let branch = self.current_branch()?;

        self.refs
            .read_branch(&branch)?
            .with_context(|| format!("HEAD branch {} does not resolve to a commit", branch))
    }

    /// The current commit (HEAD dereferenced twice)
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.load_commit(&self.head_oid()?)
    }

    /// DAG walker over this repository's commit store
    pub fn dag(&self) -> DagWalker<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        DagWalker::new(move |oid| Ok(SlimCommit::from(&self.database.load_commit(oid)?)))
    }
}
