//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Auth: Password hashing and token issuance
//! - Handlers: One per chat command
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod messaging;
