//! Blob object
//!
//! A blob is the immutable content of one tracked file at one snapshot,
//! stored verbatim and identified by the fingerprint of its bytes.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

/// Whole-content file snapshot
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    /// Compute the blob's object id (fingerprint of its bytes)
    pub fn object_id(&self) -> ObjectId {
        ObjectId::digest([self.data.as_ref()])
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}
