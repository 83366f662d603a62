use crate::areas::repository::Repository;
use crate::artifacts::status::StatusReport;
use std::io::Write;

impl Repository {
    /// Print the five status sections
    pub fn status(&self) -> anyhow::Result<()> {
        let report = StatusReport::compute(self)?;
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &report.branches {
            let marker = if branch == &report.current_branch {
                "*"
            } else {
                ""
            };
            writeln!(writer, "{}{}", marker, branch)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for file_name in &report.staged {
            writeln!(writer, "{}", file_name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for file_name in &report.removed {
            writeln!(writer, "{}", file_name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for entry in &report.modified_not_staged {
            writeln!(writer, "{}", entry)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for file_name in &report.untracked {
            writeln!(writer, "{}", file_name)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
