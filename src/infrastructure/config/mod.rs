//! Configuration management
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables, then CLI overrides applied by `main`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Signing key used when `JWT_SECRET` is not set. Known to everyone; only fit for local use.
pub const DEFAULT_JWT_SECRET: &str = "supersecret";

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabaseConfig {
    /// SQLite path, optionally prefixed with `sqlite://`; `:memory:` for a throwaway store
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub poll_timeout_seconds: i64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "workout-bot".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            token_ttl_days: crate::application::auth::TOKEN_TTL_DAYS,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            poll_timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to render config: {}", e)))
    }

    /// Defaults overlaid with the process environment
    pub fn load_env() -> Result<Self, ConfigError> {
        Config::default().apply_env()
    }

    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup. Empty values count as unset.
    pub fn apply_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.database.url = Some(url);
        }

        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = Some(token);
        }

        if let Some(cost) = get("BCRYPT_COST") {
            self.auth.bcrypt_cost = cost.trim().parse()
                .map_err(|_| ConfigError::InvalidValue(format!("BCRYPT_COST={}", cost)))?;
        }

        if let Some(days) = get("TOKEN_TTL_DAYS") {
            self.auth.token_ttl_days = days.trim().parse()
                .map_err(|_| ConfigError::InvalidValue(format!("TOKEN_TTL_DAYS={}", days)))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Range checks that apply to every mode
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue(format!(
                "bcrypt-cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, self.auth.bcrypt_cost
            )));
        }

        if !(1..=365).contains(&self.auth.token_ttl_days) {
            return Err(ConfigError::InvalidValue(format!(
                "token-ttl-days must be between 1 and 365, got {}",
                self.auth.token_ttl_days
            )));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("jwt-secret must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database.url.as_deref()
            .ok_or_else(|| ConfigError::MissingField("DATABASE_URL".to_string()))
    }

    pub fn telegram_token(&self) -> Result<&str, ConfigError> {
        self.telegram.token.as_deref()
            .ok_or_else(|| ConfigError::MissingField("TELEGRAM_BOT_TOKEN".to_string()))
    }

    /// Everything `run` needs before it may start polling
    pub fn validate_for_run(&self) -> Result<(), ConfigError> {
        self.database_url()?;
        self.telegram_token()?;
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.auth.jwt_secret == DEFAULT_JWT_SECRET
    }
}
