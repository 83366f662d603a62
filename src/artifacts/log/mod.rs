//! History rendering
//!
//! One record per commit:
//!
//! ```text
//! ===
//! commit <id>
//! Merge: <abbrev-parent> <abbrev-second-parent>    (merge commits only)
//! Date: <timestamp>
//! <message>
//! <blank line>
//! ```

use crate::artifacts::objects::commit::Commit;

pub(crate) mod graph;

/// Format one log record, trailing blank line included
pub fn format_record(commit: &Commit) -> String {
    let mut lines = vec!["===".to_string(), format!("commit {}", commit.object_id())];

    if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
        lines.push(format!(
            "Merge: {} {}",
            parent.to_short_oid(),
            second_parent.to_short_oid()
        ));
    }

    lines.push(format!("Date: {}", commit.timestamp()));
    lines.push(commit.message().to_string());
    lines.push(String::new());
    lines.push(String::new());

    lines.join("\n")
}
