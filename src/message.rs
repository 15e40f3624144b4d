//! Inbound message model and animated-media candidate extraction.

use url::Url;

use crate::types::{ChannelId, MediaFormat, MessageId, UserId};

/// Uploaded file carried on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Download URL of the upload.
    pub url: String,
    /// MIME type reported by the host, when known.
    pub content_type: Option<String>,
    /// Width in pixels, 0 when unknown.
    pub width: u32,
    /// Height in pixels, 0 when unknown.
    pub height: u32,
}

/// Dimensions of an embed preview asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedMedia {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Embed kind reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    /// Animated preview for a page link ("gifv"-style).
    Gifv,
    /// Static image preview.
    Image,
    /// Video preview.
    Video,
    /// Plain link card.
    Link,
    /// Anything else.
    Other,
}

/// Link preview carried on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Embed kind.
    pub kind: EmbedKind,
    /// Page URL the preview belongs to.
    pub url: Option<String>,
    /// Thumbnail metadata, when present.
    pub thumbnail: Option<EmbedMedia>,
    /// Full image metadata, when present.
    pub image: Option<EmbedMedia>,
}

/// Inbound chat message as delivered by the host's event dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message identifier.
    pub id: MessageId,
    /// Conversation the message arrived in.
    pub channel_id: ChannelId,
    /// Author account id.
    pub author_id: UserId,
    /// Uploaded files.
    pub attachments: Vec<Attachment>,
    /// Link previews.
    pub embeds: Vec<Embed>,
}

/// One media item worth attempting to favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCandidate {
    /// Canonical lookup key.
    pub key: String,
    /// Stored source reference.
    pub src: String,
    /// Source kind.
    pub format: MediaFormat,
    /// Width in pixels, 0 when unknown.
    pub width: u32,
    /// Height in pixels, 0 when unknown.
    pub height: u32,
}

impl Attachment {
    /// True when the upload is an animated image: GIF MIME type and a
    /// `.gif` URL path.
    pub fn is_animated_image(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_gif_mime) && has_gif_path(&self.url)
    }
}

impl Embed {
    /// Page URL of an animated-preview embed, `None` for any other kind.
    pub fn animated_page_url(&self) -> Option<&str> {
        match self.kind {
            EmbedKind::Gifv => self.url.as_deref(),
            _ => None,
        }
    }

    /// Preview dimensions: thumbnail first, then image, then 0/0.
    pub fn preview_dimensions(&self) -> (u32, u32) {
        self.thumbnail
            .or(self.image)
            .map_or((0, 0), |media| (media.width, media.height))
    }
}

impl Message {
    /// Extracts favorite candidates from attachments and embeds.
    ///
    /// Attachment and embed scanning are independent; either can be switched
    /// off by its gate.
    pub fn media_candidates(&self, attachments: bool, embeds: bool) -> Vec<MediaCandidate> {
        let mut out = Vec::new();

        if attachments {
            for att in &self.attachments {
                if att.is_animated_image() {
                    out.push(MediaCandidate {
                        key: att.url.clone(),
                        src: att.url.clone(),
                        format: MediaFormat::DirectFile,
                        width: att.width,
                        height: att.height,
                    });
                }
            }
        }

        if embeds {
            for embed in &self.embeds {
                if let Some(page) = embed.animated_page_url() {
                    let (width, height) = embed.preview_dimensions();
                    out.push(MediaCandidate {
                        key: page.to_string(),
                        src: page.to_string(),
                        format: MediaFormat::LinkEmbed,
                        width,
                        height,
                    });
                }
            }
        }

        out
    }
}

fn is_gif_mime(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .eq_ignore_ascii_case("image/gif")
}

/// Checks the parsed path component; a string that does not parse as a URL
/// falls back to a raw suffix check.
fn has_gif_path(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.path().to_ascii_lowercase().ends_with(".gif"),
        Err(_) => raw.to_ascii_lowercase().ends_with(".gif"),
    }
}
