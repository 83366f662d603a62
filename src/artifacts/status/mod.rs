//! Working tree status
//!
//! Computes the structured status report: branch listing with the current
//! marker, the two staging sets, files modified but not staged, and
//! untracked files. Rendering is left to the status command.

use crate::areas::repository::Repository;
use std::collections::BTreeSet;

/// Structured status of a repository
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusReport {
    /// All branch names (local and remote-tracking), sorted
    pub branches: Vec<String>,
    /// The HEAD value, marked with `*` in the rendering
    pub current_branch: String,
    /// Add-set file names, sorted
    pub staged: Vec<String>,
    /// Remove-set file names, sorted
    pub removed: Vec<String>,
    /// Names suffixed ` (modified)` / ` (deleted)`, sorted
    pub modified_not_staged: Vec<String>,
    /// Untracked working files, sorted
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn compute(repository: &Repository) -> anyhow::Result<Self> {
        let head_tree = repository.head_commit()?.tree().clone();
        let added = repository.staging().added()?;
        let removed = repository.staging().removed()?;
        let working_files = repository
            .workspace()
            .list_files()?
            .into_iter()
            .collect::<BTreeSet<_>>();

        let mut modified_not_staged = BTreeSet::new();

        // tracked, unstaged, and changed on disk
        for (file_name, head_blob) in &head_tree {
            if added.contains_key(file_name) || !working_files.contains(file_name) {
                continue;
            }
            let working_blob = repository.workspace().parse_blob(file_name)?;
            if &working_blob.object_id() != head_blob {
                modified_not_staged.insert(format!("{} (modified)", file_name));
            }
        }

        // staged for addition but deleted or changed since staging
        for (file_name, staged_blob) in &added {
            if !working_files.contains(file_name) {
                modified_not_staged.insert(format!("{} (deleted)", file_name));
                continue;
            }
            let working_blob = repository.workspace().parse_blob(file_name)?;
            if &working_blob.object_id() != staged_blob {
                modified_not_staged.insert(format!("{} (modified)", file_name));
            }
        }

        // tracked, not staged for removal, and gone from the working tree
        for file_name in head_tree.keys() {
            if !removed.contains_key(file_name) && !working_files.contains(file_name) {
                modified_not_staged.insert(format!("{} (deleted)", file_name));
            }
        }

        let mut untracked = working_files
            .iter()
            .filter(|file_name| {
                !head_tree.contains_key(*file_name) && !added.contains_key(*file_name)
            })
            .cloned()
            .collect::<BTreeSet<_>>();

        // a staged removal that reappeared on disk counts as untracked again
        for file_name in removed.keys() {
            if working_files.contains(file_name) {
                untracked.insert(file_name.clone());
            }
        }

        Ok(StatusReport {
            branches: repository.refs().list_branches()?,
            current_branch: repository.current_branch()?,
            staged: added.into_keys().collect(),
            removed: removed.into_keys().collect(),
            modified_not_staged: modified_not_staged.into_iter().collect(),
            untracked: untracked.into_iter().collect(),
        })
    }
}
