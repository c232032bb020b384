//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite store
//! - Storage: In-memory store
//! - Seed: Starter exercise catalog
//! - Adapters: Platform integrations (Telegram, console)

pub mod adapters;
pub mod config;
pub mod database;
pub mod seed;
pub mod storage;
