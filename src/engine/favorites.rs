use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::{
    codec::{CodecError, CollectionCodec},
    core::collection::CollectionError,
    message::Message,
    record::FavoriteDraft,
    sync::{LookupError, PublishError, SettingsSync, SettingsUpdate},
    types::{ChannelKind, MediaFormat, UserId},
};

#[derive(Debug)]
pub enum UpdateError {
    Codec(CodecError),
    Lookup(LookupError),
    Publish(PublishError),
    Collection(CollectionError),
}

impl From<CodecError> for UpdateError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<LookupError> for UpdateError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

impl From<PublishError> for UpdateError {
    fn from(value: PublishError) -> Self {
        Self::Publish(value)
    }
}

impl From<CollectionError> for UpdateError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

/// Toggles gating what gets scanned out of inbound messages.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Scan uploaded files.
    pub save_attachments: bool,
    /// Scan link-preview embeds.
    pub save_embeds: bool,
    /// Restrict scanning to one-to-one and group-direct conversations.
    pub only_direct_messages: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_attachments: true,
            save_embeds: true,
            only_direct_messages: false,
        }
    }
}

/// Idempotent, strictly additive favorites updater.
pub struct FavoritesEngine<C, S> {
    codec: C,
    sync: S,
    local_user: UserId,
    config: EngineConfig,
}

impl<C: CollectionCodec, S: SettingsSync> FavoritesEngine<C, S> {
    pub fn new(codec: C, sync: S, local_user: UserId, config: EngineConfig) -> Self {
        Self {
            codec,
            sync,
            local_user,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scans one message and attempts to favorite every qualifying media
    /// item, each as an independent transaction against the settings store.
    ///
    /// Returns the number of newly added favorites.
    pub fn process_message(&self, message: &Message, channel: Option<ChannelKind>) -> usize {
        if message.author_id == self.local_user {
            return 0;
        }
        if self.config.only_direct_messages && !channel.is_some_and(ChannelKind::is_private) {
            return 0;
        }

        let candidates =
            message.media_candidates(self.config.save_attachments, self.config.save_embeds);

        let mut added = 0usize;
        for candidate in candidates {
            if self.try_add_favorite(
                &candidate.key,
                &candidate.src,
                candidate.format,
                candidate.width,
                candidate.height,
            ) {
                added += 1;
            }
        }
        added
    }

    /// Adds one favorite under `key` unless it already exists.
    ///
    /// Returns true when a record was appended and exactly one mutation
    /// event was published; false for duplicates, empty keys, and any
    /// failure along the read-clone-append-publish path. Failures never
    /// escape this boundary; they are logged and absorbed.
    pub fn try_add_favorite(
        &self,
        key: &str,
        src: &str,
        format: MediaFormat,
        width: u32,
        height: u32,
    ) -> bool {
        match self.add_favorite(key, src, format, width, height) {
            Ok(added) => added,
            Err(err) => {
                warn!(key, error = ?err, "favorite update failed");
                false
            }
        }
    }

    fn add_favorite(
        &self,
        key: &str,
        src: &str,
        format: MediaFormat,
        width: u32,
        height: u32,
    ) -> Result<bool, UpdateError> {
        if key.is_empty() {
            return Ok(false);
        }

        let snapshot = self.sync.snapshot()?;
        let mut working = match snapshot.favorites.as_deref() {
            Some(current) => self.codec.clone_collection(current)?,
            None => self.codec.create_empty(),
        };

        if working.contains(key) {
            return Ok(false);
        }

        let record = self.codec.new_record(FavoriteDraft {
            format,
            url: key.to_string(),
            src: src.to_string(),
            width,
            height,
            order: now_secs(),
        });
        working.insert(record)?;

        let proto = self.codec.encode(&working)?;
        self.sync.publish(SettingsUpdate::partial_favorites(proto))?;
        Ok(true)
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
