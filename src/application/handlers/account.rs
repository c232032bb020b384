//! `/signup`, `/login` and `/logout`
//!
//! Passwords only ever pass through `AuthService`; they must not appear in
//! log lines or replies.

use super::{require_args, Handler, HandlerContext, HandlerResult};
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandKind, NewUser, MAX_USERNAME_LEN};

pub const SIGNUP_FAILED_REPLY: &str = "Error creating user (maybe exists)";
pub const USER_NOT_FOUND_REPLY: &str = "User not found";
pub const WRONG_PASSWORD_REPLY: &str = "Wrong password";
pub const LOGOUT_REPLY: &str = "Logout: simply discard your token client-side. (Bot does not store sessions)";

pub struct SignupHandler;

impl Handler for SignupHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
        require_args(CommandKind::Signup, args)?;
        let (username, password) = (&args[0], &args[1]);

        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CommandError::Validation(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_LEN
            )));
        }

        // A taken username is reported the same way as any other creation failure
        let user = ctx.auth.hash_password(password)
            .map_err(CommandError::from)
            .and_then(|hash| {
                ctx.store.create_user(&NewUser::new(username.as_str(), hash))
                    .map_err(CommandError::from)
            })
            .map_err(|e| {
                tracing::warn!("Signup for {} failed: {:?}", username, e);
                CommandError::Conflict(SIGNUP_FAILED_REPLY.to_string())
            })?;

        let token = ctx.auth.issue_token(user.id)?;
        tracing::info!("Registered user {} (id={})", user.username, user.id);

        Ok(format!(
            "Registered. Token: {}\n(You can store token client-side if needed)",
            token
        ))
    }
}

pub struct LoginHandler;

impl Handler for LoginHandler {
    fn handle(&self, ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
        require_args(CommandKind::Login, args)?;
        let (username, password) = (&args[0], &args[1]);

        let user = ctx.store.find_user_by_username(username)?
            .ok_or_else(|| CommandError::NotFound(USER_NOT_FOUND_REPLY.to_string()))?;

        if !ctx.auth.verify_password(&user.password_hash, password) {
            tracing::warn!("Wrong password for user {}", user.username);
            return Err(CommandError::Auth(WRONG_PASSWORD_REPLY.to_string()));
        }

        let token = ctx.auth.issue_token(user.id)?;
        tracing::info!("User {} logged in", user.username);

        Ok(format!("Logged in. Token:\n{}\n(Keep it private)", token))
    }
}

/// Tokens are not tracked anywhere, so there is nothing to invalidate
pub struct LogoutHandler;

impl Handler for LogoutHandler {
    fn handle(&self, _ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
        Ok(LOGOUT_REPLY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::application::auth::Claims;
    use crate::domain::traits::{EntityKind, WorkoutStore};
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn token_in(reply: &str) -> String {
        reply
            .split_whitespace()
            .find(|part| part.matches('.').count() == 2)
            .map(str::to_string)
            .unwrap()
    }

    fn subject(token: &str) -> String {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims
        .sub
    }

    #[test]
    fn test_signup_issues_token_for_new_user() {
        let fx = Fixture::new();
        let reply = fx.run(CommandKind::Signup, &["alice", "pw"]).unwrap();

        assert!(reply.starts_with("Registered. Token: "));
        assert_eq!(subject(&token_in(&reply)), "1");

        let stored = fx.store.find_user_by_username("alice").unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(fx.auth.verify_password(&stored.password_hash, "pw"));
    }

    #[test]
    fn test_signup_twice_conflicts_regardless_of_password() {
        let fx = Fixture::new();
        fx.run(CommandKind::Signup, &["alice", "pw"]).unwrap();

        let err = fx.run(CommandKind::Signup, &["alice", "different"]).unwrap_err();
        assert!(matches!(err, CommandError::Conflict(_)));
        assert_eq!(err.reply(), SIGNUP_FAILED_REPLY);
        assert_eq!(fx.store.count(EntityKind::User).unwrap(), 1);
    }

    #[test]
    fn test_signup_usage() {
        let fx = Fixture::new();
        let err = fx.run(CommandKind::Signup, &["alice"]).unwrap_err();
        assert_eq!(err.reply(), "Usage: /signup username password");
        assert_eq!(fx.store.count(EntityKind::User).unwrap(), 0);
    }

    #[test]
    fn test_signup_rejects_long_username() {
        let fx = Fixture::new();
        let name = "x".repeat(MAX_USERNAME_LEN + 1);
        let err = fx.run(CommandKind::Signup, &[name.as_str(), "pw"]).unwrap_err();
        assert!(matches!(err, CommandError::Validation(_)));
    }

    #[test]
    fn test_signup_hashing_failure_uses_creation_reply() {
        let fx = Fixture::new();
        let password = "p".repeat(100);
        let err = fx.run(CommandKind::Signup, &["alice", password.as_str()]).unwrap_err();
        assert_eq!(err.reply(), SIGNUP_FAILED_REPLY);
        assert_eq!(fx.store.count(EntityKind::User).unwrap(), 0);
    }

    #[test]
    fn test_login() {
        let fx = Fixture::new();
        fx.run(CommandKind::Signup, &["bob", "secret"]).unwrap();
        fx.run(CommandKind::Signup, &["alice", "pw"]).unwrap();

        let reply = fx.run(CommandKind::Login, &["alice", "pw"]).unwrap();
        assert!(reply.starts_with("Logged in. Token:\n"));
        assert!(reply.ends_with("(Keep it private)"));
        assert_eq!(subject(&token_in(&reply)), "2");
    }

    #[test]
    fn test_login_failures() {
        let fx = Fixture::new();
        fx.run(CommandKind::Signup, &["alice", "pw"]).unwrap();

        let err = fx.run(CommandKind::Login, &["nobody", "pw"]).unwrap_err();
        assert_eq!(err.reply(), USER_NOT_FOUND_REPLY);

        let err = fx.run(CommandKind::Login, &["alice", "nope"]).unwrap_err();
        assert_eq!(err.reply(), WRONG_PASSWORD_REPLY);

        let err = fx.run(CommandKind::Login, &["alice"]).unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }

    #[test]
    fn test_logout_is_static() {
        let fx = Fixture::new();
        assert_eq!(fx.run(CommandKind::Logout, &[]).unwrap(), LOGOUT_REPLY);
        assert_eq!(fx.run(CommandKind::Logout, &["extra"]).unwrap(), LOGOUT_REPLY);
    }
}
