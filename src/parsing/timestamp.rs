//! Best-effort calendar reading of export timestamps.
//!
//! Timestamps are stored as display text. This module only exists for
//! consumers that want a date (filters, statistics); a timestamp that
//! can't be read simply yields `None`.

use std::sync::LazyLock;

use chrono::NaiveDateTime;

use super::bidi::strip_directionality_marks;

const TIME_24H: &[&str] = &["%H:%M:%S", "%H:%M"];
const TIME_12H: &[&str] = &["%I:%M:%S %p", "%I:%M %p"];

/// Date layouts for one separator: two-digit years are tried before
/// four-digit ones so `24` is never read as the year 24.
fn date_layouts(sep: char, day_first: bool) -> [String; 2] {
    if day_first {
        [format!("%d{sep}%m{sep}%y"), format!("%d{sep}%m{sep}%Y")]
    } else {
        [format!("%m{sep}%d{sep}%y"), format!("%m{sep}%d{sep}%Y")]
    }
}

fn build_formats(twelve_hour: bool) -> Vec<String> {
    let times = if twelve_hour { TIME_12H } else { TIME_24H };
    // US exports pair month-first dates with a 12-hour clock.
    let orders: [bool; 2] = if twelve_hour { [false, true] } else { [true, false] };

    let mut formats = Vec::new();
    for day_first in orders {
        for sep in ['/', '.', '-'] {
            for date in date_layouts(sep, day_first) {
                for time in times {
                    formats.push(format!("{date} {time}"));
                }
            }
        }
    }
    formats
}

static FORMATS_24H: LazyLock<Vec<String>> = LazyLock::new(|| build_formats(false));
static FORMATS_12H: LazyLock<Vec<String>> = LazyLock::new(|| build_formats(true));

/// Canonical spelling: no marks or brackets, commas as spaces, single
/// spaces, meridiem as `AM`/`PM`.
fn normalize(raw: &str) -> String {
    let text = strip_directionality_marks(raw);
    let text = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .replace(['،', ','], " ")
        .replace('ص', " AM")
        .replace('م', " PM");

    let mut out = text.split_whitespace().collect::<Vec<_>>().join(" ");
    for (from, to) in [("a.m.", "AM"), ("p.m.", "PM"), ("A.M.", "AM"), ("P.M.", "PM")] {
        out = out.replace(from, to);
    }
    out
}

/// Reads a timestamp such as `15/01/2024, 10:30`, `1/15/24, 9:05 PM` or
/// `25/7/2024، 10:53` into a naive date-time.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::read_timestamp;
///
/// let dt = read_timestamp("\u{200F}25/7/2024، 10:53").unwrap();
/// assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-07-25 10:53");
/// assert!(read_timestamp("sometime").is_none());
/// ```
pub fn read_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let text = normalize(raw);
    if text.is_empty() {
        return None;
    }

    let upper = text.to_uppercase();
    let twelve_hour = upper.ends_with("AM") || upper.ends_with("PM");
    let formats = if twelve_hour { &FORMATS_12H } else { &FORMATS_24H };

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hm(raw: &str) -> Option<String> {
        read_timestamp(raw).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    #[test]
    fn test_eu_slash() {
        assert_eq!(ymd_hm("15/01/2024, 10:30").as_deref(), Some("2024-01-15 10:30:00"));
    }

    #[test]
    fn test_eu_dot_with_seconds() {
        assert_eq!(ymd_hm("26.10.2025, 20:40:12").as_deref(), Some("2025-10-26 20:40:12"));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(ymd_hm("15.01.24, 10:30").as_deref(), Some("2024-01-15 10:30:00"));
    }

    #[test]
    fn test_us_twelve_hour() {
        assert_eq!(ymd_hm("1/15/24, 10:30:45 AM").as_deref(), Some("2024-01-15 10:30:45"));
        assert_eq!(ymd_hm("[1/15/24, 9:05 PM]").as_deref(), Some("2024-01-15 21:05:00"));
        assert_eq!(ymd_hm("1/15/24, 9:05\u{202F}p.m.").as_deref(), Some("2024-01-15 21:05:00"));
    }

    #[test]
    fn test_arabic_comma_and_marks() {
        let raw = "\u{200F}25\u{200F}/\u{200F}7\u{200F}/2024\u{200F}، 10:53";
        assert_eq!(ymd_hm(raw).as_deref(), Some("2024-07-25 10:53:00"));
    }

    #[test]
    fn test_day_first_fallback_to_month_first() {
        // 13 can't be a month, so only the US reading works.
        assert_eq!(ymd_hm("12/13/2024, 08:00").as_deref(), Some("2024-12-13 08:00:00"));
    }

    #[test]
    fn test_unreadable() {
        assert!(read_timestamp("").is_none());
        assert!(read_timestamp("not a date").is_none());
        assert!(read_timestamp("32/13/2024, 10:30").is_none());
    }
}
