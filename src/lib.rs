//! # Chatlens
//!
//! A Rust library for turning exported chat transcripts into typed messages
//! and asking questions about them.
//!
//! ## Overview
//!
//! Chat exports arrive either as a plain `.txt` transcript or as a `.zip`
//! holding the transcript plus the shared media. Chatlens:
//! - recognizes message-start lines across locales (dash and bracketed styles,
//!   12h and 24h clocks, Arabic and other right-to-left exports)
//! - joins continuation lines into the open message
//! - links media markers to archive entries in order, and classifies them as
//!   image, video, audio or file
//! - filters, merges and writes the result as CSV, JSON or JSONL
//! - assembles questions (chat text, inline images, audio transcripts) for an
//!   injected answer service
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let text = "15/01/2024, 10:30 - Alice: Hello\n\
//!             15/01/2024, 10:31 - Alice: IMG-0001.jpg (file attached)\n\
//!             15/01/2024, 10:32 - Bob: Nice";
//!
//! let messages = parse_chat(text, &["IMG-0001.jpg"]);
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[1].kind(), MessageType::Image);
//! ```
//!
//! ## Zip uploads
//!
//! ```rust,no_run
//! # #[cfg(feature = "archive")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::prelude::*;
//!
//! let export = ChatExport::from_path("WhatsApp Chat with Alice.zip")?;
//! let messages = ChatLogParser::new().parse_export(&export);
//! println!("{} messages, {} attachments", messages.len(), export.attachments.len());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "archive"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatLogParser`], [`parse_chat`]
//! - [`parsing`] - line matchers, timestamps, media markers, directionality marks
//! - [`message`] - [`ParsedMessage`], [`MessageType`]
//! - [`media`] - extension classification and MIME types
//! - `archive` - [`ChatExport`](archive::ChatExport) (feature `archive`)
//! - [`config`] - [`ParserConfig`](config::ParserConfig),
//!   [`ArchiveConfig`](config::ArchiveConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`core`] - filtering, merging, statistics and writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`analysis`] - question assembly and the [`Analyst`](analysis::Analyst) conversation
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod analysis;
#[cfg(feature = "archive")]
pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod media;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::{MessageType, ParsedMessage};
pub use parser::{ChatLogParser, parse_chat};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatlensError, Result};
    pub use crate::message::{MessageType, ParsedMessage};

    pub use crate::parser::{ChatLogParser, parse_chat};
    pub use crate::parsing::LineMatcher;

    #[cfg(feature = "archive")]
    pub use crate::archive::{Attachment, ChatExport};

    pub use crate::config::{AnalysisConfig, ArchiveConfig, ParserConfig};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::{ChatStats, ProcessingStats, merge_consecutive};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    pub use crate::analysis::{AnalysisRequest, Analyst, AnswerService, Command};
}
