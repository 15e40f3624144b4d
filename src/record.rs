//! Favorite record, creation draft, and encoded-collection blob.

use serde::{Deserialize, Serialize};

use crate::types::MediaFormat;

/// Opaque serialized collection payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EncodedCollection {
    /// Raw encoded bytes.
    pub bytes: Vec<u8>,
}

/// One favorited media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Source kind.
    pub format: MediaFormat,
    /// Canonical key used for lookups and storage.
    pub url: String,
    /// Stored source reference; every capture path here sets it equal to `url`.
    pub src: String,
    /// Media width in pixels, 0 when unknown.
    pub width: u32,
    /// Media height in pixels, 0 when unknown.
    pub height: u32,
    /// Creation-time sort hint in epoch seconds, never a uniqueness key.
    pub order: i64,
}

/// Field set used to construct a new [`FavoriteRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDraft {
    /// Source kind.
    pub format: MediaFormat,
    /// Canonical key used for lookups and storage.
    pub url: String,
    /// Stored source reference.
    pub src: String,
    /// Media width in pixels, 0 when unknown.
    pub width: u32,
    /// Media height in pixels, 0 when unknown.
    pub height: u32,
    /// Creation-time sort hint in epoch seconds.
    pub order: i64,
}
