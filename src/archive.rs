//! Upload extraction: turns a `.txt` transcript or a `.zip` export into
//! transcript text plus the ordered list of bundled attachments.
//!
//! A zip export holds exactly one transcript (the first non-directory
//! `.txt` entry) and any number of media files. Attachments keep archive
//! order, which is the order filename-less media markers are resolved in.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::archive::ChatExport;
//! use chatlens::ChatLogParser;
//!
//! let export = ChatExport::from_path("WhatsApp Chat with Alice.zip")?;
//! let messages = ChatLogParser::new().parse_export(&export);
//! println!("{}: {} messages, {} attachments", export.name, messages.len(), export.attachments.len());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::config::ArchiveConfig;
use crate::error::{ChatlensError, Result};

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// A media file bundled with the transcript.
///
/// Serializes with its contents as base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Entry name inside the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// File contents; `None` when not loaded (too large, or names only).
    #[serde(default, with = "base64_data")]
    pub data: Option<Vec<u8>>,
}

mod base64_data {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

impl Attachment {
    /// The entry name without any directory prefix.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// An extracted chat upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExport {
    /// Display name, taken from the uploaded file name.
    pub name: String,
    /// Transcript text.
    pub text: String,
    /// Bundled media, in archive order.
    pub attachments: Vec<Attachment>,
}

impl ChatExport {
    /// Wraps a plain-text transcript without attachments.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Reads an upload with the default [`ArchiveConfig`].
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::UnsupportedUpload`] for anything but `.txt`/`.zip`
    /// - [`ChatlensError::InvalidFormat`] for a zip without a transcript
    /// - I/O, zip and UTF-8 errors from reading the file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_config(path, &ArchiveConfig::default())
    }

    /// Reads an upload, recognizing zips by extension or signature.
    pub fn from_path_with_config(path: impl AsRef<Path>, config: &ArchiveConfig) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chat")
            .to_string();

        let bytes = fs::read(path)?;

        if extension.as_deref() == Some("zip") || bytes.starts_with(ZIP_SIGNATURE) {
            return Self::from_zip_bytes(name, &bytes, config);
        }

        if extension.as_deref() == Some("txt") {
            let text = String::from_utf8(bytes)
                .map_err(|e| ChatlensError::utf8(path.display().to_string(), e))?;
            debug!(path = %path.display(), bytes = text.len(), "read plain-text transcript");
            return Ok(Self::from_text(name, text));
        }

        Err(ChatlensError::unsupported_upload(Some(path.to_path_buf())))
    }

    /// Extracts a zip export held in memory.
    pub fn from_zip_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        config: &ArchiveConfig,
    ) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut text: Option<String> = None;
        let mut attachments = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let entry_name = entry.name().to_string();
            if entry_name.starts_with("__MACOSX/") {
                continue;
            }

            if text.is_none() && entry_name.to_lowercase().ends_with(".txt") {
                let mut buf = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
                entry.read_to_end(&mut buf)?;
                text = Some(
                    String::from_utf8(buf).map_err(|e| ChatlensError::utf8(entry_name.clone(), e))?,
                );
                continue;
            }

            let size = entry.size();
            let data = if !config.load_attachment_data {
                None
            } else if size > config.max_attachment_size {
                warn!(
                    attachment = %entry_name,
                    size,
                    limit = config.max_attachment_size,
                    "attachment exceeds size limit, contents skipped"
                );
                None
            } else {
                let mut buf = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
                entry.read_to_end(&mut buf)?;
                Some(buf)
            };

            attachments.push(Attachment {
                name: entry_name,
                size,
                data,
            });
        }

        let text = text.ok_or_else(|| {
            ChatlensError::invalid_format("zip", "archive contains no .txt chat transcript")
        })?;

        debug!(
            transcript_bytes = text.len(),
            attachments = attachments.len(),
            "extracted zip export"
        );

        Ok(Self {
            name: name.into(),
            text,
            attachments,
        })
    }

    /// Attachment names in archive order, for the parser's queue.
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments.iter().map(|a| a.name.as_str()).collect()
    }

    /// Looks up an attachment by its entry name, falling back to the base
    /// name so `IMG.jpg` finds `Chat/IMG.jpg`.
    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.name == name)
            .or_else(|| {
                let wanted = base_name(name);
                self.attachments.iter().find(|a| a.base_name() == wanted)
            })
    }

    /// Returns the bytes of the named attachment, if loaded.
    pub fn attachment_data(&self, name: &str) -> Option<&[u8]> {
        self.attachment(name)?.data.as_deref()
    }
}
