//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use std::borrow::Cow;
use serde::{Deserialize, Serialize};

use crate::domain::entities::CommandKind;
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// sendMessage limit, counted in UTF-16 code units
pub const MAX_MESSAGE_LEN: usize = 4096;

const TRUNCATION_NOTE: &str = "\n\n(Reply truncated)";

/// Cut `text` so Telegram accepts it, keeping whole chars and ending with a note
pub fn fit_message(text: &str) -> Cow<'_, str> {
    let total: usize = text.encode_utf16().count();
    if total <= MAX_MESSAGE_LEN {
        return Cow::Borrowed(text);
    }

    let budget = MAX_MESSAGE_LEN - TRUNCATION_NOTE.encode_utf16().count();
    let mut used = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        if used + ch.len_utf16() > budget {
            break;
        }
        used += ch.len_utf16();
        end = idx + ch.len_utf8();
    }

    tracing::warn!("Reply of {} UTF-16 units truncated to fit Telegram", total);
    Cow::Owned(format!("{}{}", text[..end].trim_end(), TRUNCATION_NOTE))
}

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T, BotError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BotError::Network(format!(
                "{} failed: {}",
                method,
                self.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "workout-bot".to_string(),
                username: "workout_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, BotError>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let response = self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("Telegram API error {}: {}", status, detail)));
        }

        let data: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        data.into_result(method)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let me: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;

        self.info = BotInfo {
            id: me.id.to_string(),
            name: me.first_name,
            username: me.username,
        };

        Ok(())
    }

    /// Long-poll for new messages
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        let request = serde_json::json!({
            "offset": offset,
            "timeout": timeout,
            "allowed_updates": ["message"],
        });

        self.call("getUpdates", &request).await
    }

    /// Offset that acknowledges every update in the batch; `current` when the batch is empty
    pub fn next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }

    /// Publish the command table so clients can autocomplete it
    pub async fn register_commands(&self) -> Result<(), BotError> {
        let commands: Vec<serde_json::Value> = CommandKind::ALL
            .iter()
            .map(|kind| serde_json::json!({
                "command": kind.name(),
                "description": kind.description(),
            }))
            .collect();

        let _: bool = self.call("setMyCommands", &serde_json::json!({ "commands": commands })).await?;

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        let prefix: String = self.token.chars().take(8).collect();
        tracing::info!("Starting Telegram bot (token: {}...)", prefix);
        Ok(())
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        // Plain text: replies contain characters MarkdownV2 would reject
        let request = serde_json::json!({
            "chat_id": chat_id,
            "text": fit_message(text),
        });

        let sent: MessageResult = self.call("sendMessage", &request).await?;
        Ok(sent.message_id.to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
