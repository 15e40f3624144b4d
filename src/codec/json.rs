//! JSON envelope codec for the favorites collection.

use serde::{Deserialize, Serialize};

use crate::{
    core::collection::{CollectionError, FavoriteCollection},
    record::{EncodedCollection, FavoriteDraft, FavoriteRecord},
};

use super::{CodecError, CollectionCodec};

/// Version number for serialized collection payloads.
pub const COLLECTION_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionEnvelope {
    format_version: u16,
    records: Vec<FavoriteRecord>,
}

/// Versioned serde_json implementation of [`CollectionCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCollectionCodec;

impl CollectionCodec for JsonCollectionCodec {
    fn decode(&self, encoded: &EncodedCollection) -> Result<FavoriteCollection, CodecError> {
        let env: CollectionEnvelope = serde_json::from_slice(&encoded.bytes)?;
        if env.format_version != COLLECTION_FORMAT_VERSION {
            return Err(CodecError::UnsupportedFormat(env.format_version));
        }
        FavoriteCollection::from_records(env.records).map_err(|err| match err {
            CollectionError::AlreadyExists(key) => CodecError::DuplicateKey(key),
        })
    }

    fn encode(&self, collection: &FavoriteCollection) -> Result<EncodedCollection, CodecError> {
        let env = CollectionEnvelope {
            format_version: COLLECTION_FORMAT_VERSION,
            records: collection.to_records(),
        };
        Ok(EncodedCollection {
            bytes: serde_json::to_vec(&env)?,
        })
    }

    fn create_empty(&self) -> FavoriteCollection {
        FavoriteCollection::new()
    }

    fn new_record(&self, draft: FavoriteDraft) -> FavoriteRecord {
        FavoriteRecord {
            format: draft.format,
            url: draft.url,
            src: draft.src,
            width: draft.width,
            height: draft.height,
            order: draft.order,
        }
    }
}
