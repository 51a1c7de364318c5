//! Invisible directionality control characters.
//!
//! Exporters in right-to-left locales sprinkle these around dates and
//! attachment markers. They are not part of the visible text.

use std::borrow::Cow;

/// Character class matching one directionality mark, for use inside regexes.
pub(crate) const BIDI_CLASS: &str = r"[\x{200E}\x{200F}\x{061C}\x{202A}-\x{202E}\x{2066}-\x{2069}]";

/// Returns `true` for left-to-right/right-to-left marks, embeddings,
/// overrides and isolates.
pub fn is_directionality_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{061C}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Removes every directionality mark from `text`.
///
/// Borrows when there is nothing to remove.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::strip_directionality_marks;
///
/// assert_eq!(strip_directionality_marks("\u{200F}25\u{200F}/7/2024"), "25/7/2024");
/// ```
pub fn strip_directionality_marks(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_directionality_mark) {
        Cow::Owned(text.chars().filter(|&c| !is_directionality_mark(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}
