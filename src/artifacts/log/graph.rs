//! ASCII history graph
//!
//! Renders the commit history as one column of `*` nodes per active
//! branch. A merge commit opens a second column with a `\` connector and
//! the walk switches to the second-parent chain; when that chain rejoins
//! the first-parent chain at the merge base, a `/` connector closes the
//! column and the walk resumes from the merge's first parent.
//!
//! Branch tips are decorated with their ref names, the head commit with
//! `(HEAD -> <branch>)` in addition.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(new)]
pub struct GraphRenderer<'r> {
    repository: &'r Repository,
}

impl<'r> GraphRenderer<'r> {
    pub fn render(&self) -> anyhow::Result<String> {
        let head_branch = self.repository.current_branch()?;
        let head_id = self.repository.head_oid()?;
        let branch_leaves = self.branch_leaves()?;

        let mut output = String::new();
        let mut current = self.repository.head_commit()?;
        let mut open_columns: usize = 1;
        let mut active_column: usize = 0;
        let mut on_second_branch = false;
        let mut merge_base: Option<ObjectId> = None;
        let mut resume_commit: Option<Commit> = None;

        loop {
            for column in 0..open_columns {
                output.push_str(if column == active_column { "* " } else { "| " });
            }
            write!(output, "{} ", current.object_id().to_short_oid())?;
            if current.object_id() == &head_id {
                write!(output, "(HEAD -> {}) ", head_branch)?;
            }
            if let Some(names) = branch_leaves.get(current.object_id()) {
                write!(output, "({}) ", names)?;
            }
            writeln!(output, "{}", current.message())?;

            if let Some(second_parent) = current.second_parent() {
                let parent = current
                    .parent()
                    .context("merge commit without a first parent")?;
                merge_base = self.repository.dag().split_point(parent, second_parent)?;

                for _ in 0..open_columns {
                    output.push_str("| ");
                }
                output.push_str("\\\n");
                open_columns += 1;
                active_column += 1;

                resume_commit = Some(self.repository.database().load_commit(parent)?);
            }

            // the first-parent chain reached the merge base: close the column
            if !on_second_branch
                && merge_base.is_some()
                && current.parent() == merge_base.as_ref()
            {
                open_columns -= 1;
                for _ in 0..open_columns {
                    output.push_str("| ");
                }
                output.push_str("/\n");
            }

            let Some(parent) = current.parent() else {
                break;
            };

            current = if let Some(second_parent) = current.second_parent() {
                on_second_branch = true;
                self.repository.database().load_commit(second_parent)?
            } else if on_second_branch && merge_base.is_some() && Some(parent) == merge_base.as_ref()
            {
                on_second_branch = false;
                active_column -= 1;
                resume_commit
                    .take()
                    .context("second-branch walk without a merge to resume from")?
            } else {
                self.repository.database().load_commit(parent)?
            };
        }

        Ok(output)
    }

    /// Map each branch tip to its comma-joined ref names
    fn branch_leaves(&self) -> anyhow::Result<BTreeMap<ObjectId, String>> {
        let mut leaves: BTreeMap<ObjectId, Vec<String>> = BTreeMap::new();

        for name in self.repository.refs().list_branches()? {
            if let Some(oid) = self.repository.refs().read_branch(&name)? {
                leaves.entry(oid).or_default().push(name);
            }
        }

        Ok(leaves
            .into_iter()
            .map(|(oid, names)| (oid, names.join(", ")))
            .collect())
    }
}
