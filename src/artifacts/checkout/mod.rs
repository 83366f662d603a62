//! Working-tree reconciliation
//!
//! Safely replacing the working tree with a target snapshot is a three-step
//! protocol: refuse to clobber untracked files, materialize the target
//! tree, then prune files the target does not track. Checkout, reset,
//! merge, and pull all go through it.

pub(crate) mod reconciler;
