//! Filter messages by date range, author and type.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Messages from specific user |
//! | Type | [`with_kind`](FilterConfig::with_kind) | Messages of the given types |
//!
//! # Examples
//!
//! ## Filter by Author
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::ParsedMessage;
//!
//! let messages = vec![
//!     ParsedMessage::text("t1", "Alice", "Hello"),
//!     ParsedMessage::text("t2", "Bob", "Hi there"),
//!     ParsedMessage::text("t3", "Alice", "How are you?"),
//! ];
//!
//! // Case-insensitive author matching
//! let config = FilterConfig::new().with_author("alice");
//! let filtered = apply_filters(messages, &config);
//!
//! assert_eq!(filtered.len(), 2);
//! ```
//!
//! ## Filter by Date Range
//!
//! Timestamps are stored as display text, so date filters read them on a
//! best-effort basis (see [`ParsedMessage::parsed_timestamp`]).
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::ParsedMessage;
//!
//! # fn main() -> chatlens::Result<()> {
//! let messages = vec![
//!     ParsedMessage::text("01/01/2024, 12:00", "Alice", "Old"),
//!     ParsedMessage::text("15/06/2024, 12:00", "Alice", "New"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Messages whose timestamp can't be read are **excluded** when date filters are active
//! - Author matching is case-insensitive
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ChatlensError, Result};
use crate::message::{MessageType, ParsedMessage};

/// Configuration for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use chatlens::MessageType;
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let media_from_alice = FilterConfig::new()
///     .with_author("Alice")
///     .with_kind(MessageType::Image)
///     .with_kind(MessageType::Video)
///     .with_date_from("2024-06-01")?;
/// assert!(media_from_alice.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this author (case-insensitive).
    pub author: Option<String>,

    /// Include only messages of these types. Empty means any type.
    pub kinds: Vec<MessageType>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(date.and_time(end));
        Ok(self)
    }

    /// Sets the author filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Adds a message type to the accepted set.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageType) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Sets the start moment directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end moment directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.author.is_some() || !self.kinds.is_empty()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &ParsedMessage) -> bool {
        if let Some(ref author) = self.author {
            if msg.author.to_lowercase() != author.to_lowercase() {
                return false;
            }
        }

        if !self.kinds.is_empty() && !self.kinds.contains(&msg.kind) {
            return false;
        }

        if self.has_date_filter() {
            // Unreadable timestamp - exclude from date-filtered results
            let Some(ts) = msg.parsed_timestamp() else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns the messages that match all active filters, in their original
/// order. If no filters are active, returns the input unchanged.
pub fn apply_filters(messages: Vec<ParsedMessage>, config: &FilterConfig) -> Vec<ParsedMessage> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(author: &str, content: &str, ts: &str) -> ParsedMessage {
        ParsedMessage::text(ts, author, content)
    }

    #[test]
    fn test_filter_by_author() {
        let messages = vec![
            msg("Alice", "Hello", "t"),
            msg("Bob", "Hi", "t"),
            msg("alice", "Bye", "t"),
        ];

        let config = FilterConfig::new().with_author("ALICE");
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.author.eq_ignore_ascii_case("alice")));
    }

    #[test]
    fn test_filter_by_author_non_ascii() {
        let messages = vec![msg("Муха", "a", "t"), msg("муха", "b", "t"), msg("Оса", "c", "t")];
        let filtered = apply_filters(messages, &FilterConfig::new().with_author("МУХА"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_kind() {
        let messages = vec![
            msg("A", "text", "t"),
            msg("A", "", "t").with_attachment("a.jpg"),
            ParsedMessage::media_missing("t", "A", "<Media omitted>"),
        ];

        let config = FilterConfig::new()
            .with_kind(MessageType::Image)
            .with_kind(MessageType::MediaMissing);
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].kind, MessageType::Image);
        assert_eq!(filtered[1].kind, MessageType::MediaMissing);
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = vec![
            msg("Alice", "Old", "01/01/2024, 12:00"),
            msg("Alice", "New", "15/06/2024, 12:00"),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New");
    }

    #[test]
    fn test_filter_by_date_before_is_inclusive() {
        let messages = vec![
            msg("Alice", "Old", "[1/1/24, 11:59:00 PM]"),
            msg("Alice", "New", "[6/15/24, 9:00 AM]"),
        ];

        let config = FilterConfig::new().with_date_to("2024-01-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "Old");
    }

    #[test]
    fn test_unreadable_timestamp_excluded_when_date_filter() {
        let messages = vec![
            msg("Alice", "With date", "15/06/2024, 12:00"),
            msg("Alice", "No date", "sometime"),
        ];

        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "With date");
    }

    #[test]
    fn test_unreadable_timestamp_kept_without_date_filter() {
        let messages = vec![msg("Alice", "No date", "sometime")];
        let filtered = apply_filters(messages, &FilterConfig::new().with_author("alice"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatlensError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let messages = vec![
            msg("Alice", "Old Alice", "01/01/2024, 10:00"),
            msg("Alice", "New Alice", "15/06/2024, 10:00"),
            msg("Bob", "New Bob", "15/06/2024, 10:00"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_author("Alice");

        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New Alice");
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_author("Alice").is_active());
        assert!(FilterConfig::new().with_kind(MessageType::Audio).is_active());
        assert!(FilterConfig::new().with_date_from("2024-01-01").unwrap().is_active());
    }

    #[test]
    fn test_with_kind_deduplicates() {
        let config = FilterConfig::new()
            .with_kind(MessageType::Text)
            .with_kind(MessageType::Text);
        assert_eq!(config.kinds, vec![MessageType::Text]);
    }
}
