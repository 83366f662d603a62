//! User-facing error taxonomy
//!
//! Every recoverable failure a command can report carries its exact
//! user-visible message. The outermost layer prints the message as a single
//! line and terminates the process with a zero exit status; anything that is
//! not a `GitletError` is an internal invariant violation and surfaces as a
//! runtime failure instead.
//!
//! The two merge short-circuits (`AncestorMerge`, `FastForwardMerge`) are
//! outcomes rather than failures, but they end the operation the same way:
//! one line, exit zero.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitletError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("File does not exist.")]
    FileAbsent,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Prefix not unique.")]
    AmbiguousPrefix,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    DeletingCurrent,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,
    #[error("You have uncommited changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Given branch is an ancestor of the current branch.")]
    AncestorMerge,
    #[error("Current branch fast-forwarded.")]
    FastForwardMerge,
    #[error("A remote with that name already exists.")]
    RemoteExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
    #[error("Remote directory not found.")]
    RemoteMissing,
    #[error("That remote does not have that branch.")]
    NoSuchRemoteBranch,
    #[error("Please pull down remote changes before pushing.")]
    PushNotFastForward,
}
