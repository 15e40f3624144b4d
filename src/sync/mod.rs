//! Settings-synchronization contract and mutation envelopes.

/// In-process settings store.
pub mod memory;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{core::collection::FavoriteCollection, record::EncodedCollection};

/// Settings schema id of the favorites sub-field.
pub const FAVORITES_SCHEMA_ID: u32 = 2;

/// Event discriminator carried on every partial settings mutation.
pub const USER_SETTINGS_PROTO_UPDATE: &str = "USER_SETTINGS_PROTO_UPDATE";

#[derive(Debug)]
pub enum LookupError {
    SchemaUnavailable(u32),
    Message(String),
}

#[derive(Debug)]
pub enum PublishError {
    ChannelClosed,
    Message(String),
}

/// Encoded sub-field payload inside a mutation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPayload {
    /// Settings schema id the payload belongs to.
    #[serde(rename = "type")]
    pub schema: u32,
    /// Encoded collection bytes.
    pub proto: EncodedCollection,
}

/// One-way mutation event sent to the synchronization channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// Event discriminator, always [`USER_SETTINGS_PROTO_UPDATE`].
    pub kind: String,
    /// True when the mutation originated on this client.
    pub local: bool,
    /// True when only the touched sub-field should be merged, not the whole
    /// settings document.
    pub partial: bool,
    /// Sub-field payload.
    pub settings: SettingsPayload,
}

impl SettingsUpdate {
    /// Wraps an encoded favorites collection into a partial mutation event.
    pub fn partial_favorites(proto: EncodedCollection) -> Self {
        Self {
            kind: USER_SETTINGS_PROTO_UPDATE.to_string(),
            local: true,
            partial: true,
            settings: SettingsPayload {
                schema: FAVORITES_SCHEMA_ID,
                proto,
            },
        }
    }
}

/// Read-side view of the account settings at one instant.
///
/// The favorites handle is shared and read-only; a writable copy comes from
/// the codec round-trip, never from mutating through this snapshot.
#[derive(Debug, Clone, Default)]
pub struct SettingsSnapshot {
    /// Current favorites sub-field, absent until something is published.
    pub favorites: Option<Arc<FavoriteCollection>>,
}

/// Read plus one-way publish surface of the account-settings store.
pub trait SettingsSync {
    /// Returns the current settings snapshot.
    fn snapshot(&self) -> Result<SettingsSnapshot, LookupError>;

    /// Enqueues one mutation event toward the settings store and returns
    /// without waiting for remote propagation.
    fn publish(&self, update: SettingsUpdate) -> Result<(), PublishError>;
}
