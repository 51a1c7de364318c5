//! Message merging and statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::message::{MessageType, ParsedMessage};

/// Merges consecutive text messages from the same author into single entries.
/// This reduces token count when feeding a chat to an LLM.
///
/// Media and `media_missing` messages are never merged, so every attachment
/// keeps its own entry. The merged message keeps the first timestamp.
///
/// # Example
///
/// ```rust
/// use chatlens::ParsedMessage;
/// use chatlens::core::merge_consecutive;
///
/// let merged = merge_consecutive(vec![
///     ParsedMessage::text("t1", "Alice", "Hi"),
///     ParsedMessage::text("t2", "Alice", "How are you?"),
///     ParsedMessage::text("t3", "Bob", "Fine"),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].content, "Hi\nHow are you?");
/// assert_eq!(merged[0].timestamp, "t1");
/// ```
pub fn merge_consecutive(messages: Vec<ParsedMessage>) -> Vec<ParsedMessage> {
    let mut merged: Vec<ParsedMessage> = Vec::with_capacity(messages.len());

    for msg in messages {
        match merged.last_mut() {
            Some(last)
                if last.kind == MessageType::Text
                    && msg.kind == MessageType::Text
                    && last.author == msg.author =>
            {
                if !msg.content.is_empty() {
                    if !last.content.is_empty() {
                        last.content.push('\n');
                    }
                    last.content.push_str(&msg.content);
                }
            }
            _ => merged.push(msg),
        }
    }

    merged
}

/// Statistics about a merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Messages before merging.
    pub original_count: usize,
    /// Messages after merging.
    pub merged_count: usize,
}

impl ProcessingStats {
    /// Creates stats from before/after counts.
    pub fn new(original_count: usize, merged_count: usize) -> Self {
        Self {
            original_count,
            merged_count,
        }
    }

    /// Percentage of messages removed by merging.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }
        (1.0 - (self.merged_count as f64 / self.original_count as f64)) * 100.0
    }
}

/// Summary of a parsed chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    /// Number of messages.
    pub total: usize,
    /// Messages per type, keyed by serialized type name.
    pub by_kind: BTreeMap<&'static str, usize>,
    /// Messages per author.
    pub by_author: BTreeMap<String, usize>,
    /// Messages whose attachment couldn't be resolved.
    pub missing_media: usize,
    /// First and last timestamp text, as displayed.
    pub first_timestamp: Option<String>,
    /// See `first_timestamp`.
    pub last_timestamp: Option<String>,
}

impl ChatStats {
    /// Collects statistics over `messages`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::parse_chat;
    /// use chatlens::core::ChatStats;
    ///
    /// let messages = parse_chat("[t1] A: hi\n[t2] B: <Media omitted>", &[]);
    /// let stats = ChatStats::collect(&messages);
    /// assert_eq!(stats.total, 2);
    /// assert_eq!(stats.missing_media, 1);
    /// assert_eq!(stats.authors(), vec!["A", "B"]);
    /// ```
    pub fn collect(messages: &[ParsedMessage]) -> Self {
        let mut stats = Self {
            total: messages.len(),
            first_timestamp: messages.first().map(|m| m.timestamp.clone()),
            last_timestamp: messages.last().map(|m| m.timestamp.clone()),
            ..Self::default()
        };

        for msg in messages {
            *stats.by_kind.entry(msg.kind.as_str()).or_default() += 1;
            *stats.by_author.entry(msg.author.clone()).or_default() += 1;
            if msg.kind == MessageType::MediaMissing {
                stats.missing_media += 1;
            }
        }

        stats
    }

    /// Number of messages of `kind`.
    pub fn count(&self, kind: MessageType) -> usize {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Distinct authors, sorted.
    pub fn authors(&self) -> Vec<&str> {
        self.by_author.keys().map(String::as_str).collect()
    }

    /// Number of resolved attachments.
    pub fn media(&self) -> usize {
        MessageType::all()
            .iter()
            .filter(|k| k.is_media())
            .map(|k| self.count(*k))
            .sum()
    }
}
