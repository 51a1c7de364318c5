//! Unified error types for chatlens.
//!
//! The chat-log parser itself is total: it never fails, whatever the input.
//! Errors only come from the layers around it: reading uploads, unpacking
//! archives, writing output and talking to the external AI collaborators.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::ParsedMessage;
///
/// fn my_function() -> Result<Vec<ParsedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all fallible chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The uploaded file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The upload is neither a plain-text transcript nor a zip archive.
    #[error("Unsupported upload{}: expected a .txt or .zip chat export", path.as_ref().map(|p| format!(" '{}'", p.display())).unwrap_or_default())]
    UnsupportedUpload {
        /// The offending file path, if available
        path: Option<PathBuf>,
    },

    /// The input doesn't have the expected structure.
    ///
    /// This occurs when:
    /// - A zip archive contains no `.txt` transcript
    /// - A transcript yields no recognizable messages
    /// - An output file has an unknown extension
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown message type name (filters, CLI).
    #[error("Unknown message type '{0}'. Expected one of: text, image, video, audio, file, media_missing")]
    InvalidMessageType(String),

    /// Zip archive could not be read.
    #[cfg(feature = "archive")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when a transcript or generated output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An external collaborator (answer, transcription or speech service) failed.
    #[error("{service} service error: {message}")]
    Service {
        /// Which collaborator failed
        service: &'static str,
        /// Description reported by the collaborator
        message: String,
    },

    /// Required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an unsupported upload error.
    pub fn unsupported_upload(path: Option<PathBuf>) -> Self {
        ChatlensError::UnsupportedUpload { path }
    }

    /// Creates an error reported by an external service.
    pub fn service(service: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::Service {
            service,
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if the upload type was rejected.
    pub fn is_unsupported_upload(&self) -> bool {
        matches!(self, ChatlensError::UnsupportedUpload { .. })
    }

    /// Returns `true` if an external service failed.
    pub fn is_service(&self) -> bool {
        matches!(self, ChatlensError::Service { .. })
    }
}
