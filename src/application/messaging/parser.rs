//! Message parser - Parses raw text into structured messages

use crate::domain::entities::{Content, Message};

/// Commands start with this character
pub const COMMAND_PREFIX: char = '/';

/// Splits one line of chat text into a command name and arguments.
/// Arguments are whitespace-delimited; there is no quoting.
#[derive(Debug, Default, Clone)]
pub struct MessageParser;

impl MessageParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: &str, sender: Option<String>) -> Message {
        Message::new(chat_id, self.parse_content(text)).with_sender_opt(sender)
    }

    pub fn parse_content(&self, text: &str) -> Content {
        let mut parts = text.split_whitespace();

        let Some(first) = parts.next() else {
            return Content::Empty;
        };

        let Some(name) = first.strip_prefix(COMMAND_PREFIX) else {
            return Content::Text(text.trim().to_string());
        };

        // Group chats address commands as /name@botname
        let name = match name.split_once('@') {
            Some((name, _bot)) => name,
            None => name,
        };

        Content::Command {
            name: name.to_string(),
            args: parts.map(str::to_string).collect(),
        }
    }
}
