//! Question-and-answer history about one chat.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::request::AnalysisRequest;
use super::services::{AnswerService, SpeechSynthesizer};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Assistant turn recorded when a question can't be answered.
pub const ANSWER_FAILED: &str = "I'm sorry, I encountered an error. Please try again.";

/// Assistant turn recorded when the automatic summary can't be produced.
pub const SUMMARY_FAILED: &str =
    "I'm sorry, I couldn't generate a summary for this chat. You can still ask me questions about it.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking.
    User,
    /// The answer service.
    Assistant,
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who wrote it.
    pub role: Role,
    /// Question or answer text.
    pub content: String,
}

impl Turn {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Drives an [`AnswerService`] and keeps the conversation history.
///
/// Service failures never escape: they are logged and the matching apology
/// is recorded as the assistant's turn.
///
/// # Example
///
/// ```rust
/// use chatlens::Result;
/// use chatlens::analysis::{AnalysisRequest, Analyst, AnswerService, Role};
/// use chatlens::config::AnalysisConfig;
///
/// struct Echo;
///
/// impl AnswerService for Echo {
///     fn answer(&self, request: &AnalysisRequest) -> Result<String> {
///         Ok(format!("you asked: {}", request.query))
///     }
/// }
///
/// let mut analyst = Analyst::new(Echo, AnalysisConfig::new("key"));
/// let reply = analyst.ask(AnalysisRequest::new("t - A: hi", "who?"));
/// assert_eq!(reply, "you asked: who?");
/// assert_eq!(analyst.history()[0].role, Role::User);
/// ```
pub struct Analyst<A> {
    service: A,
    config: AnalysisConfig,
    history: Vec<Turn>,
}

impl<A: AnswerService> Analyst<A> {
    /// Starts an empty conversation.
    pub fn new(service: A, config: AnalysisConfig) -> Self {
        Self::with_history(service, config, Vec::new())
    }

    /// Resumes a saved conversation, such as one loaded from a `ChatStore`.
    pub fn with_history(service: A, config: AnalysisConfig, history: Vec<Turn>) -> Self {
        Self {
            service,
            config,
            history,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// All turns so far, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Drops the conversation.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Text of the most recent assistant turn.
    pub fn last_answer(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }

    /// Asks a question. Records the user turn, then the answer or
    /// [`ANSWER_FAILED`], and returns the assistant's text.
    pub fn ask(&mut self, request: AnalysisRequest) -> &str {
        self.history.push(Turn::user(request.query.clone()));
        self.respond(&request, ANSWER_FAILED)
    }

    /// Requests the automatic summary of `chat_text`. Only the assistant turn
    /// is recorded; a failure records [`SUMMARY_FAILED`].
    pub fn summarize(&mut self, chat_text: &str) -> &str {
        let request = AnalysisRequest::summary_request(chat_text, &self.config);
        self.respond(&request, SUMMARY_FAILED)
    }

    /// Synthesizes speech for the most recent answer.
    ///
    /// Returns `Ok(None)` when nothing has been answered yet.
    pub fn speak_last_answer<S>(&self, synthesizer: &S) -> Result<Option<Vec<u8>>>
    where
        S: SpeechSynthesizer + ?Sized,
    {
        self.last_answer()
            .map(|text| synthesizer.synthesize(text))
            .transpose()
    }

    fn respond(&mut self, request: &AnalysisRequest, fallback: &'static str) -> &str {
        let content = match self.service.answer(request) {
            Ok(answer) => {
                debug!(
                    images = request.images.len(),
                    transcriptions = request.audio_transcriptions.len(),
                    "answer received"
                );
                answer
            }
            Err(err) => {
                warn!(error = %err, "answer service failed");
                fallback.to_string()
            }
        };
        self.history.push(Turn::assistant(content));
        self.history
            .last()
            .map(|t| t.content.as_str())
            .unwrap_or(fallback)
    }
}

impl<A> std::fmt::Debug for Analyst<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyst")
            .field("config", &self.config)
            .field("turns", &self.history.len())
            .finish_non_exhaustive()
    }
}
