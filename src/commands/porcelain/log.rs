use crate::areas::repository::Repository;
use crate::artifacts::log::format_record;
use crate::artifacts::log::graph::GraphRenderer;
use crate::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print the history from the current commit, first parent only
    pub fn log(&self) -> anyhow::Result<()> {
        let mut current = self.head_commit()?;

        loop {
            write!(self.writer(), "{}", format_record(&current))?;

            match current.parent() {
                Some(parent) => current = self.database().load_commit(parent)?,
                None => break,
            }
        }

        Ok(())
    }

    /// Print every commit in the store, regardless of branch
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().all_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            write!(self.writer(), "{}", format_record(&commit))?;
        }

        Ok(())
    }

    /// Print the ids of all commits with the given message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().all_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoCommitWithMessage.into());
        }

        Ok(())
    }

    /// Print the branch-aware ASCII history graph
    pub fn graph_log(&self) -> anyhow::Result<()> {
        let rendered = GraphRenderer::new(self).render()?;
        write!(self.writer(), "{}", rendered)?;

        Ok(())
    }
}
