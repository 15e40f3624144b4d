//! Shared primitive ids and classification enums.

use serde::{Deserialize, Serialize};

/// Account identifier of a message author.
pub type UserId = u64;
/// Conversation identifier carried on inbound events.
pub type ChannelId = u64;
/// Message identifier.
pub type MessageId = u64;

/// Source kind a favorite was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    /// Animated preview embedded for a page link.
    LinkEmbed = 1,
    /// Directly uploaded animated-image file.
    DirectFile = 2,
}

/// Conversation classification reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// One-to-one conversation.
    Direct,
    /// Group direct conversation.
    Group,
    /// Server text channel.
    Text,
    /// Any other channel the host reports.
    Other,
}

impl ChannelKind {
    /// True for one-to-one and group-direct conversations.
    pub fn is_private(self) -> bool {
        matches!(self, Self::Direct | Self::Group)
    }
}
