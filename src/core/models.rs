//! Output configuration and the serialized record shape shared by writers.

use serde::Serialize;

use crate::message::{MessageType, ParsedMessage};

/// Configuration for output format.
/// Controls which fields are written besides `author` and `content`.
///
/// # Example
///
/// ```rust
/// use chatlens::core::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_media();
/// assert!(config.include_timestamps && config.include_media);
/// assert!(OutputConfig::all().include_media);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the timestamp text
    pub include_timestamps: bool,
    /// Include the message type and attachment name
    pub include_media: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field enabled.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_media: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_media(mut self) -> Self {
        self.include_media = true;
        self
    }
}

/// Borrowed view of a message with only the fields enabled in `OutputConfig`.
#[derive(Debug, Serialize)]
#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
pub(crate) struct OutputRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<&'a str>,
    pub author: &'a str,
    pub content: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageType>,
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<&'a str>,
}

#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
impl<'a> OutputRecord<'a> {
    pub fn new(msg: &'a ParsedMessage, config: &OutputConfig) -> Self {
        Self {
            timestamp: config.include_timestamps.then_some(msg.timestamp.as_str()),
            author: &msg.author,
            content: &msg.content,
            kind: config.include_media.then_some(msg.kind),
            file_name: if config.include_media {
                msg.file_name.as_deref()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_respects_config() {
        let msg = ParsedMessage::text("t", "Alice", "cap").with_attachment("a.png");

        let bare = OutputRecord::new(&msg, &OutputConfig::new());
        assert!(bare.timestamp.is_none());
        assert!(bare.kind.is_none());
        assert!(bare.file_name.is_none());

        let full = OutputRecord::new(&msg, &OutputConfig::all());
        assert_eq!(full.timestamp, Some("t"));
        assert_eq!(full.kind, Some(MessageType::Image));
        assert_eq!(full.file_name, Some("a.png"));
    }
}
