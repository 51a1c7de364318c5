//! Message-start line matchers.
//!
//! Export formats differ between exporter versions and locales. Each known
//! layout is a [`LineMatcher`]; the parser tries them in order and the first
//! one that recognizes a line wins. New layouts are supported by appending a
//! matcher, never by editing an existing one.
//!
//! Supported layouts:
//! - Locale dash: `15/01/2024, 10:30 - Alice: Hello` (also `.`/`-` dates,
//!   the Arabic comma, 12-hour clocks and interleaved directionality marks)
//! - Bracketed: `[1/15/24, 10:30:45 AM] Alice: Hello`

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::bidi::{BIDI_CLASS, strip_directionality_marks};

/// The pieces of a message-start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParts<'a> {
    /// Visible timestamp text (directionality marks removed, trimmed).
    pub timestamp: String,
    /// Author display name, trimmed.
    pub author: String,
    /// Everything after `Author:`, untouched.
    pub body: &'a str,
}

/// Recognizes lines that open a new message.
pub trait LineMatcher: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Splits `line` into its parts, or returns `None` if this layout
    /// doesn't apply.
    fn match_line<'a>(&self, line: &'a str) -> Option<LineParts<'a>>;
}

static LOCALE_DASH: LazyLock<Regex> = LazyLock::new(|| {
    let b = BIDI_CLASS;
    let date = format!(r"\d{{1,2}}{b}*[/.\-]{b}*\d{{1,2}}{b}*[/.\-]{b}*\d{{2,4}}");
    let time = format!(
        r"\d{{1,2}}[:.]\d{{2}}(?:[:.]\d{{2}})?(?:{b}*\s?{b}*(?:[AaPp]\.?\s?[Mm]\.?|ص|م))?"
    );
    let pattern = format!(
        r"^(?:{b}|\s)*(?P<ts>{date}{b}*[,،]?{b}*\s*{b}*{time}){b}*\s*{b}*[-–]\s*{b}*(?P<author>[^:]+?):\s*(?P<body>.*)$"
    );
    Regex::new(&pattern).expect("locale dash pattern is valid")
});

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    let b = BIDI_CLASS;
    let pattern = format!(
        r"^(?:{b}|\s)*\[(?P<ts>[^\]]+)\]\s*{b}*\s*(?P<author>[^:]+?):\s*(?P<body>.*)$"
    );
    Regex::new(&pattern).expect("bracketed pattern is valid")
});

/// Builds [`LineParts`] from a regex match with `ts`, `author` and `body` groups.
fn parts_from_captures<'a>(caps: &Captures<'a>) -> Option<LineParts<'a>> {
    let timestamp = strip_directionality_marks(caps.name("ts")?.as_str())
        .trim()
        .to_string();
    let author = strip_directionality_marks(caps.name("author")?.as_str())
        .trim()
        .to_string();
    let body = caps.name("body").map_or("", |m| m.as_str());

    if timestamp.is_empty() || author.is_empty() {
        return None;
    }

    Some(LineParts {
        timestamp,
        author,
        body,
    })
}

/// `DD/MM/YYYY, HH:MM - Author: text` and its locale variants.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::{LineMatcher, LocaleDashMatcher};
///
/// let parts = LocaleDashMatcher
///     .match_line("\u{200F}25\u{200F}/7\u{200F}/2024، 10:53 - Author: text")
///     .unwrap();
/// assert_eq!(parts.timestamp, "25/7/2024، 10:53");
/// assert_eq!(parts.author, "Author");
/// assert_eq!(parts.body, "text");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleDashMatcher;

impl LineMatcher for LocaleDashMatcher {
    fn name(&self) -> &'static str {
        "locale-dash"
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<LineParts<'a>> {
        parts_from_captures(&LOCALE_DASH.captures(line)?)
    }
}

/// `[timestamp] Author: text`, with anything inside the brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedMatcher;

impl LineMatcher for BracketedMatcher {
    fn name(&self) -> &'static str {
        "bracketed"
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<LineParts<'a>> {
        parts_from_captures(&BRACKETED.captures(line)?)
    }
}

/// A matcher built from a caller-supplied regex.
///
/// The pattern must define the named groups `ts`, `author` and `body`.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::{LineMatcher, PatternMatcher};
///
/// let matcher = PatternMatcher::new(
///     "iso",
///     r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \| (?P<author>[^:]+): (?P<body>.*)$",
/// )?;
/// let parts = matcher.match_line("2024-01-15 10:30 | Alice: Hi").unwrap();
/// assert_eq!(parts.author, "Alice");
/// # Ok::<(), regex::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    name: &'static str,
    regex: Regex,
}

impl PatternMatcher {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Fails if the pattern doesn't compile or lacks one of the required
    /// named groups.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let groups: Vec<&str> = regex.capture_names().flatten().collect();
        if let Some(missing) = ["ts", "author", "body"]
            .into_iter()
            .find(|g| !groups.contains(g))
        {
            return Err(regex::Error::Syntax(format!(
                "matcher '{name}' has no named group '{missing}'"
            )));
        }
        Ok(Self { name, regex })
    }
}

impl LineMatcher for PatternMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<LineParts<'a>> {
        parts_from_captures(&self.regex.captures(line)?)
    }
}

/// The built-in matchers in priority order: locale-aware first, then the
/// generic bracketed layout.
pub fn default_matchers() -> Vec<Box<dyn LineMatcher>> {
    vec![Box::new(LocaleDashMatcher), Box::new(BracketedMatcher)]
}
