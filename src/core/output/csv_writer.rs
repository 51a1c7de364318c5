//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Author`, `Content`
///   - With timestamps: `Timestamp`, `Author`, `Content`
///   - With media: `Author`, `Content`, `Type`, `FileName`
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[ParsedMessage],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(messages, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(
    messages: &[ParsedMessage],
    sink: W,
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;

    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Author");
    header.push("Content");

    if config.include_media {
        header.push("Type");
        header.push("FileName");
    }

    header
}

/// Build CSV record for a single message.
fn build_record<'a>(msg: &'a ParsedMessage, config: &OutputConfig) -> Vec<&'a str> {
    let mut record = Vec::new();

    if config.include_timestamps {
        record.push(msg.timestamp.as_str());
    }

    record.push(msg.author.as_str());
    record.push(msg.content.as_str());

    if config.include_media {
        record.push(msg.kind.as_str());
        record.push(msg.file_name.as_deref().unwrap_or_default());
    }

    record
}
