//! Questions about a parsed chat.
//!
//! This module assembles what gets sent to a language model and keeps the
//! resulting conversation. The model, speech-to-text and text-to-speech
//! clients are injected through [`AnswerService`], [`Transcriber`] and
//! [`SpeechSynthesizer`]; the crate performs no network calls itself.
//!
//! - [`request`] - [`AnalysisRequest`], inline images, chat rendering
//! - [`services`] - collaborator traits and audio transcription
//! - [`conversation`] - [`Analyst`] and its history
//! - [`command`] - `.stt` / `.ex` input commands
//! - `store` - `ChatStore` for the last chat and conversation (feature `archive`)

pub mod command;
pub mod conversation;
pub mod request;
pub mod services;
#[cfg(feature = "archive")]
pub mod store;

pub use command::Command;
pub use conversation::{ANSWER_FAILED, Analyst, Role, SUMMARY_FAILED, Turn};
pub use request::{
    AnalysisRequest, AudioTranscription, InlineImage, SUMMARY_QUERY, render_chat_log,
};
pub use services::{
    AnswerService, SpeechSynthesizer, TRANSCRIPTION_FAILED, Transcriber, transcribe_audio,
};
#[cfg(all(feature = "archive", feature = "json-output"))]
pub use store::JsonFileStore;
#[cfg(feature = "archive")]
pub use store::{ChatStore, MemoryStore, StoredChat, StoredConversation};
