//! workout-bot - log workouts from a chat
//!
//! Layers follow the usual split: `domain` holds entities and the store/bot
//! traits, `application` turns commands into replies, `infrastructure` talks
//! to SQLite, Telegram and the console.

pub mod application;
pub mod domain;
pub mod infrastructure;
