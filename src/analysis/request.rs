//! Assembly of the question sent to the answer service.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::media::mime_type;
use crate::message::{MessageType, ParsedMessage};

/// Built-in instruction used for the automatic chat summary.
pub const SUMMARY_QUERY: &str =
    "قدم ملخصًا موجزًا ومرقمًا للنقاط الرئيسية في هذه الدردشة. ابدأ بـ 'إليك ملخص الدردشة:'";

/// Renders messages as plain chat text, one `timestamp - author: content`
/// entry per message.
///
/// Media messages show `<attached: fileName>` followed by their caption.
///
/// # Example
///
/// ```rust
/// use chatlens::ParsedMessage;
/// use chatlens::analysis::render_chat_log;
///
/// let log = render_chat_log(&[
///     ParsedMessage::text("t1", "Alice", "Hi"),
///     ParsedMessage::text("t2", "Bob", "sunset").with_attachment("IMG-1.jpg"),
/// ]);
/// assert_eq!(log, "t1 - Alice: Hi\nt2 - Bob: <attached: IMG-1.jpg> sunset");
/// ```
pub fn render_chat_log(messages: &[ParsedMessage]) -> String {
    messages
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(msg: &ParsedMessage) -> String {
    let body = match msg.file_name() {
        Some(name) if msg.content.is_empty() => format!("<attached: {name}>"),
        Some(name) => format!("<attached: {name}> {}", msg.content),
        None => msg.content.clone(),
    };
    format!("{} - {}: {}", msg.timestamp, msg.author, body)
}

/// An image sent inline with a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Attachment name.
    pub file_name: String,
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
}

impl InlineImage {
    /// Encodes `bytes` as a data URI, with the MIME type taken from the name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::analysis::InlineImage;
    ///
    /// let image = InlineImage::from_bytes("dot.png", b"abc");
    /// assert_eq!(image.data_uri, "data:image/png;base64,YWJj");
    /// ```
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let file_name = file_name.into();
        let data_uri = format!("data:{};base64,{}", mime_type(&file_name), STANDARD.encode(bytes));
        Self {
            file_name,
            data_uri,
        }
    }
}

/// The transcript of one audio attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTranscription {
    /// Attachment name.
    pub file_name: String,
    /// Transcribed text, or the failure placeholder.
    pub transcription: String,
}

/// One question for the answer service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Chat text the question is about.
    pub chat_log: String,
    /// The question.
    pub query: String,
    /// Images sent inline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<InlineImage>,
    /// Transcripts of audio attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_transcriptions: Vec<AudioTranscription>,
    /// Language the answer should be written in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_language: Option<String>,
}

impl AnalysisRequest {
    /// A question with no media.
    pub fn new(chat_log: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            chat_log: chat_log.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    /// A question about a whole chat.
    ///
    /// Sends the first `config.max_images` image messages whose bytes
    /// `attachment_data` can provide.
    pub fn for_chat<'a, F>(
        messages: &[ParsedMessage],
        attachment_data: F,
        query: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Self
    where
        F: Fn(&str) -> Option<&'a [u8]>,
    {
        let images = messages
            .iter()
            .filter(|m| m.kind == MessageType::Image)
            .filter_map(|m| {
                let name = m.file_name()?;
                attachment_data(name).map(|bytes| InlineImage::from_bytes(name, bytes))
            })
            .take(config.max_images)
            .collect();

        Self {
            images,
            response_language: config.response_language.clone(),
            ..Self::new(render_chat_log(messages), query)
        }
    }

    /// A question about one selected message, with its image inline when
    /// the bytes are available.
    pub fn for_message(
        message: &ParsedMessage,
        media: Option<&[u8]>,
        query: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Self {
        let images = match (message.kind, message.file_name(), media) {
            (MessageType::Image, Some(name), Some(bytes)) => {
                vec![InlineImage::from_bytes(name, bytes)]
            }
            _ => Vec::new(),
        };

        Self {
            images,
            response_language: config.response_language.clone(),
            ..Self::new(render_line(message), query)
        }
    }

    /// The automatic summary request: the chat text cut to
    /// `config.summary_char_limit` characters and the built-in summary query.
    pub fn summary_request(chat_text: &str, config: &AnalysisConfig) -> Self {
        let chat_log: String = chat_text.chars().take(config.summary_char_limit).collect();
        Self {
            response_language: config.response_language.clone(),
            ..Self::new(chat_log, SUMMARY_QUERY)
        }
    }

    /// Attaches audio transcripts.
    #[must_use]
    pub fn with_transcriptions(mut self, transcriptions: Vec<AudioTranscription>) -> Self {
        self.audio_transcriptions = transcriptions;
        self
    }

    /// Renders the text prompt. Image bytes travel separately; the prompt
    /// only lists their names.
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::from(
            "You are an expert in analyzing chat logs, including text, images, and audio transcriptions.\n\n\
             Based on the provided chat log and any included media, answer the following question as accurately as possible.\n\n",
        );

        prompt.push_str("Chat Log:\n");
        prompt.push_str(&self.chat_log);
        prompt.push_str("\n\n");

        if !self.images.is_empty() {
            prompt.push_str("Images included in the chat:\n");
            for image in &self.images {
                prompt.push_str(&format!("- {}\n", image.file_name));
            }
            prompt.push('\n');
        }

        if !self.audio_transcriptions.is_empty() {
            prompt.push_str("Audio Transcriptions from the chat:\n");
            for audio in &self.audio_transcriptions {
                prompt.push_str(&format!(
                    "- Transcription for {}: {}\n",
                    audio.file_name, audio.transcription
                ));
            }
            prompt.push('\n');
        }

        prompt.push_str("Question:\n");
        prompt.push_str(&self.query);

        if let Some(ref language) = self.response_language {
            prompt.push_str(&format!("\n\nAnswer in {language}."));
        }

        prompt
    }
}
