//! Persistence for the last uploaded chat and its conversation.
//!
//! Only one chat and one conversation are kept at a time: saving replaces
//! whatever was stored before. [`MemoryStore`] keeps them in memory;
//! [`JsonFileStore`] writes them as JSON files in a directory.
//!
//! # Example
//!
//! ```rust
//! use chatlens::analysis::{ChatStore, MemoryStore, Role, Turn};
//! use chatlens::archive::ChatExport;
//! use chatlens::ChatLogParser;
//!
//! let export = ChatExport::from_text("chat", "[t] Alice: hi");
//! let messages = ChatLogParser::new().parse_export(&export);
//!
//! let mut store = MemoryStore::default();
//! store.save_chat(&export, &messages)?;
//! store.save_conversation(&[Turn { role: Role::User, content: "who?".into() }])?;
//!
//! let restored = store.latest_chat()?.unwrap();
//! assert_eq!(restored.messages, messages);
//! assert_eq!(store.latest_conversation()?.unwrap().len(), 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

#[cfg(feature = "json-output")]
use std::fs;
#[cfg(feature = "json-output")]
use std::io;
#[cfg(feature = "json-output")]
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "json-output")]
use tracing::debug;

use super::conversation::Turn;
use crate::archive::ChatExport;
use crate::error::Result;
use crate::message::ParsedMessage;

/// A saved upload together with its parsed messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChat {
    /// Transcript and attachment bytes.
    pub export: ChatExport,
    /// Messages parsed from the transcript.
    pub messages: Vec<ParsedMessage>,
    /// When it was saved.
    pub saved_at: DateTime<Utc>,
}

/// A saved question-and-answer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConversation {
    /// Turns, oldest first.
    pub turns: Vec<Turn>,
    /// When it was saved.
    pub saved_at: DateTime<Utc>,
}

/// Keeps the most recent chat and conversation between sessions.
pub trait ChatStore {
    /// Stores `export` and its parsed `messages`, replacing any earlier chat.
    fn save_chat(&mut self, export: &ChatExport, messages: &[ParsedMessage]) -> Result<()>;

    /// The most recently saved chat.
    fn latest_chat(&self) -> Result<Option<StoredChat>>;

    /// Stores the conversation, replacing any earlier one.
    fn save_conversation(&mut self, turns: &[Turn]) -> Result<()>;

    /// The most recently saved conversation.
    fn latest_conversation(&self) -> Result<Option<Vec<Turn>>>;

    /// Removes the chat and the conversation.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory [`ChatStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    chat: Option<StoredChat>,
    conversation: Option<StoredConversation>,
}

impl ChatStore for MemoryStore {
    fn save_chat(&mut self, export: &ChatExport, messages: &[ParsedMessage]) -> Result<()> {
        self.chat = Some(StoredChat {
            export: export.clone(),
            messages: messages.to_vec(),
            saved_at: Utc::now(),
        });
        Ok(())
    }

    fn latest_chat(&self) -> Result<Option<StoredChat>> {
        Ok(self.chat.clone())
    }

    fn save_conversation(&mut self, turns: &[Turn]) -> Result<()> {
        self.conversation = Some(StoredConversation {
            turns: turns.to_vec(),
            saved_at: Utc::now(),
        });
        Ok(())
    }

    fn latest_conversation(&self) -> Result<Option<Vec<Turn>>> {
        Ok(self.conversation.as_ref().map(|c| c.turns.clone()))
    }

    fn clear(&mut self) -> Result<()> {
        self.chat = None;
        self.conversation = None;
        Ok(())
    }
}

/// [`ChatStore`] writing `chat.json` and `conversation.json` into a directory.
#[cfg(feature = "json-output")]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

#[cfg(feature = "json-output")]
impl JsonFileStore {
    const CHAT_FILE: &'static str = "chat.json";
    const CONVERSATION_FILE: &'static str = "conversation.json";

    /// Uses `dir`, creating it on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        debug!(path = %path.display(), "saved");
        Ok(())
    }

    fn read<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Result<Option<T>> {
        match fs::read(self.dir.join(file)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn remove(&self, file: &str) -> Result<()> {
        match fs::remove_file(self.dir.join(file)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(feature = "json-output")]
impl ChatStore for JsonFileStore {
    fn save_chat(&mut self, export: &ChatExport, messages: &[ParsedMessage]) -> Result<()> {
        self.write(
            Self::CHAT_FILE,
            &StoredChat {
                export: export.clone(),
                messages: messages.to_vec(),
                saved_at: Utc::now(),
            },
        )
    }

    fn latest_chat(&self) -> Result<Option<StoredChat>> {
        self.read(Self::CHAT_FILE)
    }

    fn save_conversation(&mut self, turns: &[Turn]) -> Result<()> {
        self.write(
            Self::CONVERSATION_FILE,
            &StoredConversation {
                turns: turns.to_vec(),
                saved_at: Utc::now(),
            },
        )
    }

    fn latest_conversation(&self) -> Result<Option<Vec<Turn>>> {
        Ok(self
            .read::<StoredConversation>(Self::CONVERSATION_FILE)?
            .map(|c| c.turns))
    }

    fn clear(&mut self) -> Result<()> {
        self.remove(Self::CHAT_FILE)?;
        self.remove(Self::CONVERSATION_FILE)
    }
}
