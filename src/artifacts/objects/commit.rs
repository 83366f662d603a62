//! Commit object
//!
//! A commit is an immutable snapshot record: a message, a preformatted
//! timestamp, up to two parent ids, and a tree mapping file names to blob
//! ids. Commits form a DAG through their parent fingerprints.
//!
//! ## On-disk format
//!
//! ```text
//! timestamp <formatted timestamp>
//! parent <id>           (absent on the bootstrap commit)
//! merge <id>            (present iff this is a merge commit)
//! tree <name> <blob-id> (one line per entry, sorted by name)
//!
//! <message>
//! ```
//!
//! The id is derived from the logical fields, not from the serialized
//! bytes, and deliberately excludes the second parent.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message of the bootstrap commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Timestamp format, local timezone (`Thu Jan 01 00:00:00 1970 +0000`)
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Snapshot tree: file name to blob fingerprint
///
/// A sorted map so that iteration, equality, and the canonical rendering
/// used for id derivation are all deterministic.
pub type TreeMap = BTreeMap<String, ObjectId>;

/// Commit record
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message (non-empty except for the bootstrap commit)
    message: String,
    /// Wall-clock timestamp, preformatted at creation time
    timestamp: String,
    /// First parent (absent only on the bootstrap commit)
    parent: Option<ObjectId>,
    /// Second parent (present iff this commit is a merge)
    second_parent: Option<ObjectId>,
    /// Tracked files at this snapshot
    tree: TreeMap,
    /// Derived fingerprint
    id: ObjectId,
}

impl Commit {
    /// Create the bootstrap commit: empty tree, no parent, epoch timestamp
    pub fn bootstrap() -> Self {
        let timestamp = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
            .with_timezone(&chrono::Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();

        Self::from_fields(
            INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp,
            None,
            None,
            TreeMap::new(),
        )
    }

    /// Create a commit stamped with the current wall-clock time
    pub fn new(
        message: String,
        parent: ObjectId,
        second_parent: Option<ObjectId>,
        tree: TreeMap,
    ) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        Self::from_fields(message, timestamp, Some(parent), second_parent, tree)
    }

    fn from_fields(
        message: String,
        timestamp: String,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        tree: TreeMap,
    ) -> Self {
        let id = Self::derive_id(&message, &timestamp, parent.as_ref(), &tree);

        Commit {
            message,
            timestamp,
            parent,
            second_parent,
            tree,
            id,
        }
    }

    /// Derive the commit id from (message, timestamp, parent-or-empty, tree)
    ///
    /// The second parent is excluded on purpose: two merges of the same
    /// first parent with the same message and timestamp share an id.
    fn derive_id(
        message: &str,
        timestamp: &str,
        parent: Option<&ObjectId>,
        tree: &TreeMap,
    ) -> ObjectId {
        let parent = parent.map(|oid| oid.as_ref()).unwrap_or("");
        let canonical_tree = Self::canonical_tree(tree);

        ObjectId::digest([
            message.as_bytes(),
            timestamp.as_bytes(),
            parent.as_bytes(),
            canonical_tree.as_bytes(),
        ])
    }

    /// Canonical tree rendering, sorted by file name
    fn canonical_tree(tree: &TreeMap) -> String {
        let entries = tree
            .iter()
            .map(|(name, oid)| format!("{}={}", name, oid))
            .collect::<Vec<_>>();

        format!("{{{}}}", entries.join(", "))
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn tree(&self) -> &TreeMap {
        &self.tree
    }

    /// Serialize the commit to its on-disk record
    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("timestamp {}", self.timestamp)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("merge {}", second_parent));
        }
        for (name, oid) in &self.tree {
            lines.push(format!("tree {} {}", name, oid));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        let mut content = Vec::new();
        content.write_all(lines.join("\n").as_bytes())?;

        Ok(Bytes::from(content))
    }

    /// Deserialize a commit from its on-disk record
    ///
    /// The id is recomputed from the logical fields, so a round trip always
    /// restores the fingerprint the commit was stored under.
    pub fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, _>>()?;
        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit record: missing timestamp line")?
            .to_string();

        let mut parent = None;
        let mut second_parent = None;
        let mut tree = TreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(oid) = line.strip_prefix("merge ") {
                second_parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("tree ") {
                let (name, oid) = entry
                    .rsplit_once(' ')
                    .context("Invalid commit record: malformed tree line")?;
                tree.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit record: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Self::from_fields(
            message,
            timestamp,
            parent,
            second_parent,
            tree,
        ))
    }
}
