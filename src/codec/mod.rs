//! Wire codec contract for the favorites collection.

/// JSON envelope implementation.
pub mod json;

use crate::{
    core::collection::FavoriteCollection,
    record::{EncodedCollection, FavoriteDraft, FavoriteRecord},
};

#[derive(Debug)]
pub enum CodecError {
    Serde(serde_json::Error),
    UnsupportedFormat(u16),
    DuplicateKey(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Capability the update engine requires from the collection wire format.
pub trait CollectionCodec {
    /// Decodes an encoded collection, failing on malformed or incompatible
    /// bytes without partially mutating anything.
    fn decode(&self, encoded: &EncodedCollection) -> Result<FavoriteCollection, CodecError>;

    /// Encodes a mutable collection back to its wire form.
    fn encode(&self, collection: &FavoriteCollection) -> Result<EncodedCollection, CodecError>;

    /// Constructs a collection with zero records.
    fn create_empty(&self) -> FavoriteCollection;

    /// Constructs a record value from a draft. Uniqueness is not checked
    /// here; that is the engine's job.
    fn new_record(&self, draft: FavoriteDraft) -> FavoriteRecord;

    /// Round-trip copy through the wire format.
    ///
    /// The mutable form owns container state that only a fresh decode
    /// materializes; this is the only sanctioned copy path, never a
    /// structural copy.
    fn clone_collection(
        &self,
        collection: &FavoriteCollection,
    ) -> Result<FavoriteCollection, CodecError> {
        self.decode(&self.encode(collection)?)
    }
}
