//! Merge decision table and conflict synthesis
//!
//! For each path in the union of the three trees, compare the blob
//! fingerprints at the split point (`s`), in the current branch (`c`), and
//! in the given branch (`g`):
//!
//! | s | c    | g         | Action                      |
//! |---|------|-----------|-----------------------------|
//! | s | s    | g != s    | take given, stage add       |
//! | s | c!=s | s         | keep current                |
//! | s | c    | g = c     | keep current                |
//! | s | c!=s | g!=s,g!=c | conflict                    |
//! | s | s    | absent    | delete, stage remove        |
//! | s | c!=s | absent    | conflict (modified/deleted) |
//! | s | ∅    | s         | stays absent                |
//! | s | ∅    | g != s    | conflict (deleted/modified) |
//! | ∅ | ∅    | g         | take given, stage add       |
//! | ∅ | c    | ∅         | keep current                |
//! | ∅ | c!=g | g         | conflict                    |
//! | ∅ | c=g  | g         | keep current                |

use crate::artifacts::objects::commit::TreeMap;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;

/// One actionable step of a merge plan
///
/// Paths the table leaves untouched produce no step at all.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MergeAction {
    /// Check out the given branch's blob and stage it for addition
    TakeGiven(ObjectId),
    /// Delete the working file and stage it for removal
    Remove,
    /// Synthesize a conflict file from the two sides (absent side = empty)
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Compute the merge plan over the union of the three trees' paths
pub fn plan(split: &TreeMap, current: &TreeMap, given: &TreeMap) -> Vec<(String, MergeAction)> {
    let paths = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .filter_map(|path| {
            resolve(split.get(path), current.get(path), given.get(path))
                .map(|action| (path.clone(), action))
        })
        .collect()
}

fn resolve(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<MergeAction> {
    match (split, current, given) {
        (Some(s), Some(c), Some(g)) => {
            if c == g {
                None
            } else if c == s {
                Some(MergeAction::TakeGiven(g.clone()))
            } else if g == s {
                None
            } else {
                Some(MergeAction::Conflict {
                    current: Some(c.clone()),
                    given: Some(g.clone()),
                })
            }
        }
        (Some(s), Some(c), None) => {
            if c == s {
                Some(MergeAction::Remove)
            } else {
                Some(MergeAction::Conflict {
                    current: Some(c.clone()),
                    given: None,
                })
            }
        }
        (Some(s), None, Some(g)) => {
            if g == s {
                None
            } else {
                Some(MergeAction::Conflict {
                    current: None,
                    given: Some(g.clone()),
                })
            }
        }
        (Some(_), None, None) => None,
        (None, None, Some(g)) => Some(MergeAction::TakeGiven(g.clone())),
        (None, Some(_), None) => None,
        (None, Some(c), Some(g)) => {
            if c == g {
                None
            } else {
                Some(MergeAction::Conflict {
                    current: Some(c.clone()),
                    given: Some(g.clone()),
                })
            }
        }
        (None, None, None) => None,
    }
}

/// Synthesize the conflict-marker file content
///
/// The two sides are concatenated verbatim between the markers; an absent
/// side contributes nothing.
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current.unwrap_or_default());
    content.extend_from_slice(b"=======\n");
    content.extend_from_slice(given.unwrap_or_default());
    content.extend_from_slice(b">>>>>>>\n");

    content.into()
}
