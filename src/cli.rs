//! Command-line interface definition using clap.
//!
//! [`Args`] only describes the command line. Its helper methods map the
//! arguments onto the library's own configuration types so `main` stays a
//! straight pipeline.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::core::{FilterConfig, OutputConfig};
use crate::error::Result;
use crate::format::OutputFormat;
use crate::message::MessageType;

/// Default output path when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "chat.csv";

/// Parse exported chat transcripts (.txt or .zip with media) into
/// structured messages.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens \"WhatsApp Chat with Alice.zip\"
    chatlens chat.txt -o messages.json
    chatlens chat.zip --after 2024-01-01 --kind image --kind video -m
    chatlens chat.zip --ask \"What did we decide?\" --request-out request.json")]
pub struct Args {
    /// Path to the exported chat (.txt or .zip)
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format (csv, json, jsonl); inferred from the output extension if omitted
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this author only (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep messages of this type (repeatable)
    #[arg(long = "kind", value_name = "KIND")]
    pub kinds: Vec<MessageType>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message type and attachment name in output
    #[arg(short = 'm', long)]
    pub media: bool,

    /// Disable merging consecutive text messages from the same author
    #[arg(long)]
    pub no_merge: bool,

    /// Build a question about the chat for an answer service
    #[arg(long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Where to write the question request as JSON (default: request.json)
    #[arg(long, value_name = "PATH", requires = "ask")]
    pub request_out: Option<PathBuf>,
}

impl Args {
    /// Output format: the explicit `-f`, else the output extension, else CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(&self.output).ok())
            .unwrap_or_default()
    }

    /// Output path, with the extension following `-f` when the default path
    /// is in use.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_path() != Path::new(DEFAULT_OUTPUT) {
            return self.output.clone();
        }
        self.output.with_extension(self.output_format().extension())
    }

    /// Filter built from `--after`, `--before`, `--from` and `--kind`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new();

        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_author(from.clone());
        }
        for kind in &self.kinds {
            config = config.with_kind(*kind);
        }

        Ok(config)
    }

    /// Output columns selected by `-t` and `-m`.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.media {
            config = config.with_media();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatlens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chat.zip"]);
        assert_eq!(args.input, PathBuf::from("chat.zip"));
        assert_eq!(args.output_format(), OutputFormat::Csv);
        assert_eq!(args.output_path(), PathBuf::from("chat.csv"));
        assert!(!args.filter_config().unwrap().is_active());
        assert_eq!(args.output_config(), OutputConfig::new());
    }

    #[test]
    fn test_format_adjusts_default_output() {
        let args = parse(&["chat.txt", "-f", "jsonl"]);
        assert_eq!(args.output_path(), PathBuf::from("chat.jsonl"));
    }

    #[test]
    fn test_format_inferred_from_output() {
        let args = parse(&["chat.txt", "-o", "out.json"]);
        assert_eq!(args.output_format(), OutputFormat::Json);
        assert_eq!(args.output_path(), PathBuf::from("out.json"));
    }

    #[test]
    fn test_filters_and_columns() {
        let args = parse(&[
            "chat.txt", "--after", "2024-01-01", "--from", "Alice", "--kind", "image", "--kind",
            "audio", "-t", "-m",
        ]);
        let filter = args.filter_config().unwrap();
        assert!(filter.has_date_filter());
        assert_eq!(filter.kinds, vec![MessageType::Image, MessageType::Audio]);
        assert_eq!(args.output_config(), OutputConfig::all());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse(&["chat.txt", "--after", "01/02/2024"]).filter_config().is_err());
        assert!(Args::try_parse_from(["chatlens", "chat.txt", "--kind", "sticker"]).is_err());
        assert!(Args::try_parse_from(["chatlens", "chat.txt", "-f", "xml"]).is_err());
        assert!(Args::try_parse_from(["chatlens", "chat.txt", "--request-out", "r.json"]).is_err());
    }
}
