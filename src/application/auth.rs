//! Password hashing and bearer-token issuance
//!
//! Tokens are HS256 JWTs carrying the user id and an absolute expiry. They are
//! never checked by the bot itself and there is no revocation list, so expiry
//! is the only way a token stops being valid. Commands are not gated on them.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::application::errors::AuthError;
use crate::infrastructure::config::AuthConfig;

/// bcrypt only looks at the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default token lifetime
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Hashes passwords and signs tokens with the process-wide secret
pub struct AuthService {
    encoding_key: EncodingKey,
    bcrypt_cost: u32,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: &[u8], bcrypt_cost: u32, token_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            bcrypt_cost,
            token_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.bcrypt_cost,
            Duration::days(config.token_ttl_days),
        )
    }

    /// Salted bcrypt hash at the configured cost
    pub fn hash_password(&self, plaintext: &str) -> Result<String, AuthError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::Hashing(format!(
                "password longer than {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(plaintext, self.bcrypt_cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// False on mismatch and on a malformed hash; never errors
    pub fn verify_password(&self, hash: &str, plaintext: &str) -> bool {
        // bcrypt would silently compare only the truncated prefix
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    pub fn claims_for(&self, user_id: i64, issued_at: DateTime<Utc>) -> Claims {
        Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.token_ttl).timestamp(),
        }
    }

    /// Sign a token for `user_id` expiring `token_ttl` from now
    pub fn issue_token(&self, user_id: i64) -> Result<String, AuthError> {
        let claims = self.claims_for(user_id, Utc::now());
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
