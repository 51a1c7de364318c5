//! JSON Lines (JSONL) output writer.
//!
//! One message per line, which suits retrieval pipelines and tools that
//! process records one at a time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::models::{OutputConfig, OutputRecord};
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"author":"Alice","content":"Hello"}
/// {"author":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(
    messages: &[ParsedMessage],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(messages, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(messages: &[ParsedMessage], out: &mut W, config: &OutputConfig) -> Result<()> {
    for msg in messages {
        serde_json::to_writer(&mut *out, &OutputRecord::new(msg, config))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
