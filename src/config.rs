//! Configuration types for parsing, upload extraction and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The binary maps its arguments
//! onto them.
//!
//! - [`ParserConfig`] - chat-log parser behavior
//! - [`ArchiveConfig`] - zip upload extraction limits
//! - [`AnalysisConfig`] - answer/transcription service settings
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::ParserConfig;
//! use chatlens::ChatLogParser;
//!
//! let config = ParserConfig::new().with_attachment_queue(false);
//! let parser = ChatLogParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};

/// Configuration for the chat-log parser.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_media_detection(true)
///     .with_attachment_queue(true);
/// assert!(config.detect_media);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Recognize media markers in message bodies (default: true).
    /// When disabled every message is `text`.
    pub detect_media: bool,

    /// Resolve filename-less markers against the attachment list
    /// (default: true). When disabled they become `media_missing`.
    pub use_attachment_queue: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            detect_media: true,
            use_attachment_queue: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables media-marker detection.
    #[must_use]
    pub fn with_media_detection(mut self, enabled: bool) -> Self {
        self.detect_media = enabled;
        self
    }

    /// Enables or disables positional attachment resolution.
    #[must_use]
    pub fn with_attachment_queue(mut self, enabled: bool) -> Self {
        self.use_attachment_queue = enabled;
        self
    }
}

/// Configuration for reading uploads.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ArchiveConfig;
///
/// let config = ArchiveConfig::new().with_max_attachment_size(5 * 1024 * 1024);
/// assert_eq!(config.max_attachment_size, 5 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Attachments larger than this (uncompressed bytes) are skipped
    /// (default: 64MB).
    pub max_attachment_size: u64,

    /// Keep attachment bytes in memory (default: true). When disabled only
    /// the names are collected.
    pub load_attachment_data: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_attachment_size: 64 * 1024 * 1024, // 64MB
            load_attachment_data: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that only lists attachment names.
    pub fn names_only() -> Self {
        Self {
            load_attachment_data: false,
            ..Self::default()
        }
    }

    /// Sets the maximum attachment size.
    #[must_use]
    pub fn with_max_attachment_size(mut self, size: u64) -> Self {
        self.max_attachment_size = size;
        self
    }

    /// Sets whether attachment bytes are kept.
    #[must_use]
    pub fn with_attachment_data(mut self, enabled: bool) -> Self {
        self.load_attachment_data = enabled;
        self
    }
}

/// Settings for the external answer and transcription services.
///
/// Built once per process and handed to the collaborators that need it;
/// nothing reads these values from global state.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new("secret-key")
///     .with_model("gemini-1.5-flash")
///     .with_response_language("ar");
/// assert_eq!(config.max_images, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// API key for the answer service.
    pub api_key: String,

    /// Base URL of the answer service.
    pub endpoint: String,

    /// Model identifier.
    pub model: String,

    /// Language answers should be written in, if fixed.
    pub response_language: Option<String>,

    /// Language hint for speech-to-text (default: "ar").
    pub transcription_language: String,

    /// Maximum number of images sent with one question (default: 10).
    pub max_images: usize,

    /// Maximum characters of chat text sent for a summary (default: 12000).
    pub summary_char_limit: usize,
}

impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("response_language", &self.response_language)
            .field("transcription_language", &self.transcription_language)
            .field("max_images", &self.max_images)
            .field("summary_char_limit", &self.summary_char_limit)
            .finish()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            response_language: None,
            transcription_language: "ar".to_string(),
            max_images: 10,
            summary_char_limit: 12_000,
        }
    }
}

impl AnalysisConfig {
    /// Environment variable holding the API key.
    pub const ENV_API_KEY: &'static str = "CHATLENS_API_KEY";
    /// Environment variable overriding the endpoint.
    pub const ENV_ENDPOINT: &'static str = "CHATLENS_ENDPOINT";
    /// Environment variable overriding the model.
    pub const ENV_MODEL: &'static str = "CHATLENS_MODEL";

    /// Creates a configuration with the given API key and defaults otherwise.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from `CHATLENS_*` environment variables.
    ///
    /// Fails with [`ChatlensError::MissingConfig`] when no API key is set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ChatlensError::MissingConfig(Self::ENV_API_KEY))?;

        let mut config = Self::new(api_key);
        if let Ok(endpoint) = std::env::var(Self::ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var(Self::ENV_MODEL) {
            config.model = model;
        }
        Ok(config)
    }

    /// Checks that the values required to reach the service are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ChatlensError::MissingConfig("api_key"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ChatlensError::MissingConfig("endpoint"));
        }
        if self.model.trim().is_empty() {
            return Err(ChatlensError::MissingConfig("model"));
        }
        Ok(())
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Fixes the language answers are written in.
    #[must_use]
    pub fn with_response_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = Some(language.into());
        self
    }

    /// Sets the speech-to-text language hint.
    #[must_use]
    pub fn with_transcription_language(mut self, language: impl Into<String>) -> Self {
        self.transcription_language = language.into();
        self
    }

    /// Sets the image cap per question.
    #[must_use]
    pub fn with_max_images(mut self, max: usize) -> Self {
        self.max_images = max;
        self
    }

    /// Sets the summary input limit in characters.
    #[must_use]
    pub fn with_summary_char_limit(mut self, limit: usize) -> Self {
        self.summary_char_limit = limit;
        self
    }
}
