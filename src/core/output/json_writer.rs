//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::{OutputConfig, OutputRecord};
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"author": "Alice", "content": "Hello"},
///   {"author": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(
    messages: &[ParsedMessage],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to JSON string as an array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let records: Vec<OutputRecord<'_>> = messages
        .iter()
        .map(|m| OutputRecord::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
