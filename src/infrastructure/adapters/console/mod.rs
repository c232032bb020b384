//! Console adapter for local use without a bot token

use async_trait::async_trait;
use std::io::Write;
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Console bot adapter: stdin in, stdout out
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "workout-bot".to_string(),
                username: "console".to_string(),
            },
        }
    }

    /// Read one line; `None` on end of input
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            print!("{}", prompt);
            let _ = std::io::stdout().flush();

            let mut input = String::new();
            match std::io::stdin().read_line(&mut input) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(input),
            }
        })
        .await
        .ok()
        .flatten()
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_bot_info_and_send() {
        let bot = ConsoleAdapter::new();
        assert!(bot.start().await.is_ok());
        assert_eq!(bot.bot_info().username, "console");
        assert_eq!(bot.send_message("console", "hi").await.unwrap(), "console_msg");
    }
}
