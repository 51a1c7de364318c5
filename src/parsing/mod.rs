//! Line-level building blocks shared by the parser.
//!
//! - [`bidi`]: directionality-mark handling
//! - [`matcher`]: message-start line matchers
//! - [`marker`]: media markers inside message bodies
//! - [`timestamp`]: best-effort calendar reading of timestamps

pub mod bidi;
pub mod marker;
pub mod matcher;
pub mod timestamp;

pub use bidi::{is_directionality_mark, strip_directionality_marks};
pub use marker::{MarkerMatch, MediaMarker};
pub use matcher::{
    BracketedMatcher, LineMatcher, LineParts, LocaleDashMatcher, PatternMatcher, default_matchers,
};
pub use timestamp::read_timestamp;
