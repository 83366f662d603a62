//! Immutable repository objects
//!
//! Everything the object store persists is built from two object kinds:
//!
//! - `Blob`: the raw bytes of one tracked file at one snapshot
//! - `Commit`: a snapshot record with parents and a tree of (path, blob id)
//!
//! Both are addressed by `ObjectId`, a 40-character hexadecimal fingerprint.

pub(crate) mod blob;
pub(crate) mod commit;
pub(crate) mod object_id;

/// Length of a full fingerprint in hexadecimal characters
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated fingerprint
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
