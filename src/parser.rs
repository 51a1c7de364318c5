//! The chat-log parser.
//!
//! Turns the raw text of a chat export plus the ordered list of attachment
//! names from its archive into an ordered sequence of [`ParsedMessage`].
//!
//! The parse is a single left-to-right pass:
//!
//! 1. Each line is offered to the message-start matchers in order
//!    (locale-dash first, then bracketed, then any appended ones).
//! 2. A matching line closes the open message and opens a new one. Its body
//!    is checked for a media marker; markers without a filename take the next
//!    name from the attachment queue, or become `media_missing` once the
//!    queue is empty.
//! 3. Any other line is appended to the open message with a newline, or
//!    dropped if no message is open yet.
//!
//! The parser is total: every input produces a (possibly empty) result.
//!
//! # Example
//!
//! ```rust
//! use chatlens::{ChatLogParser, MessageType};
//!
//! let text = "[1/15/24, 10:30 AM] Alice: Look\n\
//!             [1/15/24, 10:31 AM] Alice: <Media omitted>\n\
//!             [1/15/24, 10:32 AM] Bob: Nice!\n\
//!             see you";
//!
//! let messages = ChatLogParser::new().parse(text, &["IMG-0001.jpg"]);
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[1].kind(), MessageType::Image);
//! assert_eq!(messages[1].file_name(), Some("IMG-0001.jpg"));
//! assert_eq!(messages[2].content(), "Nice!\nsee you");
//! ```
//!
//! # Streaming
//!
//! [`ChatLogParser::messages`] yields each message as soon as the next
//! message-start line (or the end of input) completes it:
//!
//! ```rust
//! use std::io::{BufRead, Cursor};
//! use chatlens::ChatLogParser;
//!
//! let reader = Cursor::new("15/01/2024, 10:30 - Alice: Hi\n15/01/2024, 10:31 - Bob: Hey\n");
//! let parser = ChatLogParser::new();
//! let authors: Vec<String> = parser
//!     .messages(reader.lines().map_while(Result::ok), &[])
//!     .map(|m| m.author)
//!     .collect();
//! assert_eq!(authors, vec!["Alice", "Bob"]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::message::ParsedMessage;
use crate::parsing::{LineMatcher, LineParts, MediaMarker, default_matchers};

/// Parser for exported chat transcripts.
///
/// Holds no per-parse state, so one instance can serve any number of
/// concurrent callers.
pub struct ChatLogParser {
    config: ParserConfig,
    matchers: Vec<Box<dyn LineMatcher>>,
}

impl ChatLogParser {
    /// Creates a parser with the built-in matchers and default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            matchers: default_matchers(),
        }
    }

    /// Appends a matcher for an additional export layout.
    ///
    /// It is tried after every matcher already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::ChatLogParser;
    /// use chatlens::parsing::PatternMatcher;
    ///
    /// let iso = PatternMatcher::new(
    ///     "iso",
    ///     r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \| (?P<author>[^:]+): (?P<body>.*)$",
    /// )?;
    /// let parser = ChatLogParser::new().with_matcher(Box::new(iso));
    ///
    /// let messages = parser.parse("2024-01-15 10:30 | Alice: Hi", &[]);
    /// assert_eq!(messages.len(), 1);
    /// assert_eq!(parser.matcher_names(), vec!["locale-dash", "bracketed", "iso"]);
    /// # Ok::<(), regex::Error>(())
    /// ```
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn LineMatcher>) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Names of the registered matchers, in the order they are tried.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Parses a whole transcript.
    ///
    /// `attachment_names` is consumed front to back whenever a media marker
    /// carries no filename of its own. Empty names are ignored.
    pub fn parse(&self, raw_text: &str, attachment_names: &[&str]) -> Vec<ParsedMessage> {
        let messages: Vec<ParsedMessage> =
            self.messages(raw_text.lines(), attachment_names).collect();

        debug!(
            messages = messages.len(),
            attachments = attachment_names.len(),
            "parsed chat transcript"
        );
        messages
    }

    /// Lazily parses a sequence of lines.
    pub fn messages<'p, 'n, I, L>(
        &'p self,
        lines: I,
        attachment_names: &[&'n str],
    ) -> Messages<'p, 'n, I::IntoIter>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let known: Vec<&'n str> = attachment_names
            .iter()
            .copied()
            .filter(|name| !name.is_empty())
            .collect();
        Messages {
            parser: self,
            lines: lines.into_iter(),
            queue: known.iter().copied().collect(),
            known,
            current: None,
        }
    }

    /// Reads and parses a plain-text transcript from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid UTF-8.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        attachment_names: &[&str],
    ) -> Result<Vec<ParsedMessage>> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ChatlensError::utf8(path.display().to_string(), e))?;
        Ok(self.parse(&text, attachment_names))
    }

    /// Parses an extracted upload, resolving markers against its attachments.
    #[cfg(feature = "archive")]
    pub fn parse_export(&self, export: &crate::archive::ChatExport) -> Vec<ParsedMessage> {
        self.parse(&export.text, &export.attachment_names())
    }

    /// Builds the message opened by `line`, if it is a message-start line.
    fn start_message(
        &self,
        line: &str,
        queue: &mut VecDeque<&str>,
        known: &[&str],
    ) -> Option<ParsedMessage> {
        let line = line.trim_start_matches('\u{FEFF}');
        let parts = self.matchers.iter().find_map(|m| m.match_line(line))?;
        Some(self.classify(parts, queue, known))
    }

    fn classify(
        &self,
        parts: LineParts<'_>,
        queue: &mut VecDeque<&str>,
        known: &[&str],
    ) -> ParsedMessage {
        let LineParts {
            timestamp,
            author,
            body,
        } = parts;

        let marker = if self.config.detect_media {
            MediaMarker::detect(body)
        } else {
            None
        };
        let Some(marker) = marker else {
            return ParsedMessage::text(timestamp, author, body);
        };

        if let Some(name) = marker.file_name {
            let (prose, name) = split_known_name(&name, known);
            let content = if prose.is_empty() {
                marker.caption
            } else {
                format!("{prose} {}", marker.caption).trim_end().to_string()
            };
            return ParsedMessage::text(timestamp, author, content).with_attachment(name);
        }

        if marker.consumes_attachment && self.config.use_attachment_queue {
            if let Some(name) = queue.pop_front() {
                return ParsedMessage::text(timestamp, author, marker.caption)
                    .with_attachment(name);
            }
        }

        ParsedMessage::media_missing(timestamp, author, body.trim())
    }
}

impl Default for ChatLogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChatLogParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatLogParser")
            .field("config", &self.config)
            .field("matchers", &self.matcher_names())
            .finish()
    }
}

fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Splits a spelled-out attachment name into leading prose and the name.
///
/// Android exports put no delimiter before the name, so the marker may have
/// swallowed words the user typed first. When the archive's file list is
/// known and only a trailing part of the name is in it, that part wins.
fn split_known_name<'a>(name: &'a str, known: &[&str]) -> (&'a str, &'a str) {
    let is_known = |candidate: &str| {
        known
            .iter()
            .any(|k| *k == candidate || base_name(k) == candidate)
    };
    if known.is_empty() || is_known(name) {
        return ("", name);
    }
    name.match_indices(char::is_whitespace)
        .map(|(i, _)| (name[..i].trim_end(), name[i..].trim_start()))
        .find(|(_, tail)| is_known(tail))
        .unwrap_or(("", name))
}

/// Streaming iterator returned by [`ChatLogParser::messages`].
pub struct Messages<'p, 'n, I> {
    parser: &'p ChatLogParser,
    lines: I,
    queue: VecDeque<&'n str>,
    known: Vec<&'n str>,
    current: Option<ParsedMessage>,
}

impl<I> Messages<'_, '_, I> {
    /// Number of attachment names not yet consumed.
    pub fn remaining_attachments(&self) -> usize {
        self.queue.len()
    }
}

fn finalize(mut message: ParsedMessage) -> ParsedMessage {
    let trimmed = message.content.trim();
    if trimmed.len() != message.content.len() {
        message.content = trimmed.to_string();
    }
    message
}

impl<I, L> Iterator for Messages<'_, '_, I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
    type Item = ParsedMessage;

    fn next(&mut self) -> Option<ParsedMessage> {
        for item in self.lines.by_ref() {
            let line = item.as_ref();
            match self.parser.start_message(line, &mut self.queue, &self.known) {
                Some(message) => {
                    if let Some(done) = self.current.replace(message) {
                        return Some(finalize(done));
                    }
                }
                None => {
                    if let Some(open) = self.current.as_mut() {
                        open.content.push('\n');
                        open.content.push_str(line);
                    }
                }
            }
        }
        self.current.take().map(finalize)
    }
}

/// Parses `raw_text` with a default [`ChatLogParser`].
///
/// # Example
///
/// ```rust
/// use chatlens::{MessageType, parse_chat};
///
/// let messages = parse_chat("[t1] A: line1\nextra\n[t2] B: line2", &[]);
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].content(), "line1\nextra");
/// assert_eq!(messages[1].kind(), MessageType::Text);
/// ```
pub fn parse_chat(raw_text: &str, attachment_names: &[&str]) -> Vec<ParsedMessage> {
    ChatLogParser::new().parse(raw_text, attachment_names)
}
