//! In-process account-settings store.

use std::sync::{Arc, Mutex};

use crate::{
    codec::{json::JsonCollectionCodec, CollectionCodec},
    core::collection::FavoriteCollection,
};

use super::{
    LookupError, PublishError, SettingsSnapshot, SettingsSync, SettingsUpdate, FAVORITES_SCHEMA_ID,
};

#[derive(Default)]
struct MemoryState {
    favorites: Option<Arc<FavoriteCollection>>,
    published: Vec<SettingsUpdate>,
}

/// Cloneable handle to an in-memory settings store.
///
/// Publishing validates and applies the mutation to the local snapshot
/// before returning, and records the envelope for inspection.
#[derive(Clone, Default)]
pub struct MemorySettings {
    inner: Arc<Mutex<MemoryState>>,
    codec: JsonCollectionCodec,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current favorites snapshot, as an already-synchronized
    /// store would appear at startup.
    pub fn seed(&self, collection: FavoriteCollection) {
        if let Ok(mut state) = self.inner.lock() {
            state.favorites = Some(Arc::new(collection));
        }
    }

    /// Current favorites snapshot, if any.
    pub fn favorites(&self) -> Option<Arc<FavoriteCollection>> {
        self.inner.lock().ok().and_then(|state| state.favorites.clone())
    }

    /// Every envelope published so far, oldest first.
    pub fn published(&self) -> Vec<SettingsUpdate> {
        self.inner
            .lock()
            .map(|state| state.published.clone())
            .unwrap_or_default()
    }

    /// Number of envelopes published so far.
    pub fn publish_count(&self) -> usize {
        self.inner.lock().map(|state| state.published.len()).unwrap_or(0)
    }
}

impl SettingsSync for MemorySettings {
    fn snapshot(&self) -> Result<SettingsSnapshot, LookupError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| LookupError::Message("settings store poisoned".to_string()))?;
        Ok(SettingsSnapshot {
            favorites: state.favorites.clone(),
        })
    }

    fn publish(&self, update: SettingsUpdate) -> Result<(), PublishError> {
        if update.settings.schema != FAVORITES_SCHEMA_ID {
            return Err(PublishError::Message(format!(
                "unknown settings schema: {}",
                update.settings.schema
            )));
        }

        let applied = self.codec.decode(&update.settings.proto).map_err(|err| {
            PublishError::Message(format!("undecodable favorites payload: {err:?}"))
        })?;

        let mut state = self
            .inner
            .lock()
            .map_err(|_| PublishError::Message("settings store poisoned".to_string()))?;
        state.favorites = Some(Arc::new(applied));
        state.published.push(update);
        Ok(())
    }
}
