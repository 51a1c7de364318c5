//! External collaborators the analysis layer calls out to.
//!
//! No implementation ships with the crate. Callers inject their own client
//! (HTTP, local model, test double) through these traits.

use tracing::warn;

use super::request::{AnalysisRequest, AudioTranscription};
use crate::error::Result;
use crate::media::mime_type;
use crate::message::{MessageType, ParsedMessage};

/// Placeholder stored when an audio attachment can't be transcribed.
pub const TRANSCRIPTION_FAILED: &str = "[Audio transcription failed]";

/// Answers questions about a chat.
pub trait AnswerService {
    /// Returns the answer text for `request`.
    fn answer(&self, request: &AnalysisRequest) -> Result<String>;
}

/// Speech-to-text for audio attachments.
pub trait Transcriber {
    /// Transcribes `audio` of the given MIME type.
    fn transcribe(&self, audio: &[u8], mime_type: &str, language: &str) -> Result<String>;
}

/// Text-to-speech for answers.
pub trait SpeechSynthesizer {
    /// Returns encoded audio for `text`.
    fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Transcribes every audio message whose bytes `attachment_data` provides.
///
/// A failed transcription is logged and recorded as [`TRANSCRIPTION_FAILED`]
/// so the remaining attachments are still processed.
pub fn transcribe_audio<'a, T, F>(
    transcriber: &T,
    messages: &[ParsedMessage],
    attachment_data: F,
    language: &str,
) -> Vec<AudioTranscription>
where
    T: Transcriber + ?Sized,
    F: Fn(&str) -> Option<&'a [u8]>,
{
    messages
        .iter()
        .filter(|m| m.kind == MessageType::Audio)
        .filter_map(|m| {
            let name = m.file_name()?;
            let bytes = attachment_data(name)?;
            let transcription = match transcriber.transcribe(bytes, mime_type(name), language) {
                Ok(text) => text,
                Err(err) => {
                    warn!(file = name, error = %err, "audio transcription failed");
                    TRANSCRIPTION_FAILED.to_string()
                }
            };
            Some(AudioTranscription {
                file_name: name.to_string(),
                transcription,
            })
        })
        .collect()
}
