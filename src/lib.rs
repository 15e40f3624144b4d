//! Idempotent favorites capture for animated media seen in a chat stream.
//!
//! Inbound messages are scanned for animated-image content (uploads and
//! "gifv"-style link embeds); newly-seen items are appended to the user's
//! favorites collection, a versioned encoded blob published back to the
//! account-settings store as a partial mutation event. Duplicate keys never
//! mutate or re-publish anything.
//!
//! # Examples
//!
//! Direct engine usage against the in-memory settings store:
//! ```
//! use gifkeep::{
//!     codec::json::JsonCollectionCodec,
//!     engine::favorites::{EngineConfig, FavoritesEngine},
//!     sync::memory::MemorySettings,
//!     types::MediaFormat,
//! };
//!
//! let settings = MemorySettings::new();
//! let engine = FavoritesEngine::new(
//!     JsonCollectionCodec,
//!     settings.clone(),
//!     9001,
//!     EngineConfig::default(),
//! );
//!
//! let url = "https://cdn.example/a.gif";
//! assert!(engine.try_add_favorite(url, url, MediaFormat::DirectFile, 100, 80));
//! assert!(!engine.try_add_favorite(url, url, MediaFormat::DirectFile, 100, 80));
//! assert_eq!(settings.publish_count(), 1);
//! ```
//!
//! Runtime usage with the dispatch loop:
//! ```no_run
//! use gifkeep::{
//!     codec::json::JsonCollectionCodec,
//!     engine::favorites::{EngineConfig, FavoritesEngine},
//!     message::{Attachment, Message},
//!     runtime::handle::{spawn_favorites, ChannelDirectory, RuntimeConfig},
//!     sync::memory::MemorySettings,
//!     types::{ChannelId, ChannelKind},
//! };
//!
//! struct StaticDirectory;
//!
//! impl ChannelDirectory for StaticDirectory {
//!     fn classify(&self, _channel: ChannelId) -> Option<ChannelKind> {
//!         Some(ChannelKind::Direct)
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let engine = FavoritesEngine::new(
//!     JsonCollectionCodec,
//!     MemorySettings::new(),
//!     9001,
//!     EngineConfig::default(),
//! );
//! let handle = spawn_favorites(engine, Box::new(StaticDirectory), RuntimeConfig::default());
//!
//! let message = Message {
//!     id: 1,
//!     channel_id: 7,
//!     author_id: 42,
//!     attachments: vec![Attachment {
//!         url: "https://cdn.example/a.gif".to_string(),
//!         content_type: Some("image/gif".to_string()),
//!         width: 100,
//!         height: 80,
//!     }],
//!     embeds: vec![],
//! };
//! let added = handle.message_created(message, false).await.expect("scan");
//! assert_eq!(added, 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Wire codec contract and JSON implementation.
pub mod codec;
/// Mutable collection form and invariants.
pub mod core;
/// Favorites update engine and per-message orchestration.
pub mod engine;
/// Inbound message model and candidate extraction.
pub mod message;
/// Local SQLite mirror of published settings state.
pub mod persist;
/// Favorite record, draft, and encoded blob types.
pub mod record;
/// Dispatch-loop runtime and event stream APIs.
pub mod runtime;
/// Settings-synchronization contract and stores.
pub mod sync;
/// Shared primitive ids and enums.
pub mod types;
