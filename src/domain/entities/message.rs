use chrono::{DateTime, Utc};

/// Parsed message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// `/name arg1 arg2 ...` with the leading slash and any `@botname` suffix removed
    Command { name: String, args: Vec<String> },
    /// Non-empty text that does not start with `/`
    Text(String),
    /// Blank or whitespace-only input
    Empty,
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An inbound chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub chat_id: String,
    pub sender: Option<String>,
    pub content: Content,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender: None,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn with_sender_opt(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }
}
