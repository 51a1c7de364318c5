//! Dot-commands typed into the conversation input.

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `.stt`: read the last answer aloud.
    SpeakLastAnswer,
    /// `.ex`: leave the conversation.
    Exit,
    /// Any other input, trimmed.
    Query(String),
}

impl Command {
    /// Parses one line of input. Blank input yields `None`.
    ///
    /// Commands are matched after trimming and lowercasing.
    ///
    /// ```rust
    /// use chatlens::analysis::Command;
    ///
    /// assert_eq!(Command::parse(" .EX "), Some(Command::Exit));
    /// assert_eq!(Command::parse("who?"), Some(Command::Query("who?".into())));
    /// assert_eq!(Command::parse("   "), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match trimmed.to_lowercase().as_str() {
            ".stt" => Command::SpeakLastAnswer,
            ".ex" => Command::Exit,
            _ => Command::Query(trimmed.to_string()),
        })
    }
}
