use crate::areas::repository::Repository;
use crate::artifacts::checkout::reconciler::Reconciler;
use crate::artifacts::merge::resolver::{self, MergeAction};
use crate::artifacts::objects::commit::TreeMap;
use crate::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Three-way merge of the given branch into the current one
    pub fn merge(&self, branch_name: &str) -> anyhow::Result<()> {
        if !self.staging().is_empty()? {
            return Err(GitletError::UncommittedChanges.into());
        }

        let given_oid = self
            .refs()
            .read_branch(branch_name)?
            .ok_or(GitletError::NoSuchBranch)?;

        let current_branch = self.current_branch()?;
        if branch_name == current_branch {
            return Err(GitletError::SelfMerge.into());
        }

        Reconciler::new(self).assert_no_untracked()?;

        let current = self.head_commit()?;
        let given = self.database().load_commit(&given_oid)?;
        let split_oid = self
            .dag()
            .split_point(current.object_id(), given.object_id())?;

        if split_oid.as_ref() == Some(given.object_id()) {
            return Err(GitletError::AncestorMerge.into());
        }
        if split_oid.as_ref() == Some(current.object_id()) {
            self.checkout_branch(branch_name)?;
            // the branch being fast-forwarded catches up with the given head
            self.refs().write_branch(&current_branch, given.object_id())?;
            return Err(GitletError::FastForwardMerge.into());
        }

        let split_tree = match &split_oid {
            Some(oid) => self.database().load_commit(oid)?.tree().clone(),
            None => TreeMap::new(),
        };

        let plan = resolver::plan(&split_tree, current.tree(), given.tree());
        let mut conflicted = false;

        for (file_name, action) in plan {
            match action {
                MergeAction::TakeGiven(blob_id) => {
                    let blob = self.database().load_blob(&blob_id)?;
                    self.workspace().write_file(&file_name, blob.data())?;
                    self.add(&file_name)?;
                }
                MergeAction::Remove => {
                    self.workspace().remove_file(&file_name)?;
                    self.rm(&file_name)?;
                }
                MergeAction::Conflict { current, given } => {
                    let current_data = match &current {
                        Some(blob_id) => Some(self.database().load_blob(blob_id)?.into_data()),
                        None => None,
                    };
                    let given_data = match &given {
                        Some(blob_id) => Some(self.database().load_blob(blob_id)?.into_data()),
                        None => None,
                    };
                    let content = resolver::conflict_content(
                        current_data.as_deref(),
                        given_data.as_deref(),
                    );

                    self.workspace().write_file(&file_name, &content)?;
                    self.add(&file_name)?;
                    conflicted = true;
                }
            }
        }

        let message = format!("Merged {} into {}.", branch_name, current_branch);
        self.commit_with_second_parent(&message, Some(given_oid))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }
}
