//! Message dispatcher - Routes parsed commands to handlers
//!
//! Stateless between messages: every line is parsed, handled and answered on
//! its own. Nothing about the sender is remembered.

use crate::application::auth::AuthService;
use crate::application::errors::CommandError;
use crate::application::handlers::{handler_for, HandlerContext, UNKNOWN_COMMAND_REPLY};
use crate::domain::entities::{CommandKind, Content, Message};
use crate::domain::traits::WorkoutStore;
use super::parser::MessageParser;

pub struct CommandDispatcher {
    parser: MessageParser,
    store: Box<dyn WorkoutStore>,
    auth: AuthService,
}

impl CommandDispatcher {
    pub fn new(store: Box<dyn WorkoutStore>, auth: AuthService) -> Self {
        Self {
            parser: MessageParser::new(),
            store,
            auth,
        }
    }

    pub fn store(&self) -> &dyn WorkoutStore {
        self.store.as_ref()
    }

    /// Process a raw text line. `None` means the line was blank and gets no reply.
    pub fn process_text(&self, chat_id: impl Into<String>, text: &str) -> Option<String> {
        let message = self.parser.parse(chat_id, text, None);
        self.process(&message)
    }

    /// Process a parsed message
    pub fn process(&self, message: &Message) -> Option<String> {
        match &message.content {
            Content::Empty => None,
            Content::Text(_) => Some(UNKNOWN_COMMAND_REPLY.to_string()),
            Content::Command { name, args } => Some(self.dispatch(&message.chat_id, name, args)),
        }
    }

    fn dispatch(&self, chat_id: &str, name: &str, args: &[String]) -> String {
        let Some(kind) = CommandKind::from_name(name) else {
            tracing::debug!("[{}] Unknown command /{}", chat_id, name);
            return UNKNOWN_COMMAND_REPLY.to_string();
        };

        // Arguments are not logged: /signup and /login carry passwords
        tracing::info!("[{}] /{} ({} args)", chat_id, kind.name(), args.len());

        let ctx = HandlerContext {
            store: self.store.as_ref(),
            auth: &self.auth,
        };

        match handler_for(kind).handle(&ctx, args) {
            Ok(reply) => reply,
            Err(e @ CommandError::Internal(_)) => {
                tracing::error!("[{}] /{} failed: {}", chat_id, kind.name(), e);
                e.reply()
            }
            Err(e) => {
                tracing::debug!("[{}] /{} rejected: {}", chat_id, kind.name(), e);
                e.reply()
            }
        }
    }
}
