//! Typed message produced by the chat-log parser.
//!
//! This module provides [`ParsedMessage`], the only durable entity the parser
//! emits, and [`MessageType`], the classification of its payload.
//!
//! # Overview
//!
//! A message consists of:
//! - `timestamp`: verbatim display text from the export (never normalized)
//! - `author`: trimmed sender display name
//! - `content`: trimmed body, internal newlines preserved
//! - `kind`: one of `text`, `image`, `video`, `audio`, `file`, `media_missing`
//! - `file_name`: set for `image`, `video`, `audio` and `file`
//!
//! # Examples
//!
//! ```
//! use chatlens::{MessageType, ParsedMessage};
//!
//! let msg = ParsedMessage::text("15/01/2024, 10:30", "Alice", "Hello!");
//! assert_eq!(msg.kind(), MessageType::Text);
//! assert!(msg.file_name().is_none());
//!
//! let photo = ParsedMessage::text("15/01/2024, 10:31", "Alice", "")
//!     .with_attachment("IMG-0001.jpg");
//! assert_eq!(photo.kind(), MessageType::Image);
//! assert_eq!(photo.file_name(), Some("IMG-0001.jpg"));
//! ```
//!
//! ## Serialization
//!
//! The serialized shape uses the field names downstream consumers persist:
//! `timestamp`, `author`, `content`, `type` and `fileName`.
//!
//! ```
//! use chatlens::ParsedMessage;
//!
//! let msg = ParsedMessage::text("[1/15/24, 10:30 AM]", "Bob", "Hi");
//! let json = serde_json::to_string(&msg)?;
//! assert!(json.contains(r#""type":"text""#));
//! assert!(!json.contains("fileName"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::media::classify_file_name;
use crate::parsing::timestamp::read_timestamp;

/// Classification of a message's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Plain text body.
    #[default]
    Text,
    /// Image attachment.
    Image,
    /// Video attachment.
    Video,
    /// Audio attachment (voice notes included).
    Audio,
    /// Any other attachment.
    File,
    /// The export flags an attachment that could not be resolved.
    MediaMissing,
}

impl MessageType {
    /// Returns `true` for types that carry a resolved attachment.
    pub fn is_media(self) -> bool {
        matches!(
            self,
            MessageType::Image | MessageType::Video | MessageType::Audio | MessageType::File
        )
    }

    /// Serialized name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::Video => "video",
            MessageType::Audio => "audio",
            MessageType::File => "file",
            MessageType::MediaMissing => "media_missing",
        }
    }

    /// Returns all message types.
    pub fn all() -> &'static [MessageType] {
        &[
            MessageType::Text,
            MessageType::Image,
            MessageType::Video,
            MessageType::Audio,
            MessageType::File,
            MessageType::MediaMissing,
        ]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "video" => Ok(MessageType::Video),
            "audio" => Ok(MessageType::Audio),
            "file" => Ok(MessageType::File),
            "media_missing" | "missing" => Ok(MessageType::MediaMissing),
            _ => Err(ChatlensError::InvalidMessageType(s.to_string())),
        }
    }
}

/// One message of a parsed chat export.
///
/// Values are built during a single pass over the transcript and are not
/// mutated once the parse completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Timestamp exactly as shown in the export.
    pub timestamp: String,

    /// Sender display name.
    pub author: String,

    /// Message body. For media messages this is the caption, with the
    /// attachment marker removed.
    pub content: String,

    /// Payload classification.
    #[serde(rename = "type", default)]
    pub kind: MessageType,

    /// Attachment name for `image`, `video`, `audio` and `file` messages.
    #[serde(
        rename = "fileName",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub file_name: Option<String>,
}

impl ParsedMessage {
    /// Creates a text message.
    pub fn text(
        timestamp: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            author: author.into(),
            content: content.into(),
            kind: MessageType::Text,
            file_name: None,
        }
    }

    /// Creates a message whose attachment could not be resolved.
    ///
    /// `content` keeps the original marker text so it stays visible.
    pub fn media_missing(
        timestamp: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageType::MediaMissing,
            ..Self::text(timestamp, author, content)
        }
    }

    /// Builder method attaching a file; the type follows the file extension.
    ///
    /// An empty name leaves the message unchanged.
    #[must_use]
    pub fn with_attachment(mut self, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        if file_name.is_empty() {
            return self;
        }
        self.kind = classify_file_name(&file_name);
        self.file_name = Some(file_name);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the verbatim timestamp text.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the payload classification.
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Returns the attachment name, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Best-effort calendar reading of the timestamp text.
    ///
    /// Returns `None` when the text matches none of the known export layouts.
    /// The parser never relies on this; it is used by date filters.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        read_timestamp(&self.timestamp)
    }

    /// Returns `true` if the message carries a resolved attachment.
    pub fn is_media(&self) -> bool {
        self.kind.is_media()
    }

    /// Returns `true` if this message's content is empty or whitespace-only
    /// and no attachment is present.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.content.trim().is_empty()
    }
}
