//! Application layer errors

use rusqlite::{ffi, ErrorCode};
use thiserror::Error;

/// Reply sent when a command fails for reasons the user cannot fix
pub const INTERNAL_ERROR_REPLY: &str = "Something went wrong, please try again later.";

/// Transport and process-level errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors.
///
/// Display renders the text the user sees, except for `Internal` which
/// is logged and replaced by [`INTERNAL_ERROR_REPLY`].
#[derive(Error, Debug)]
pub enum CommandError {
    /// Too few arguments; carries the usage line
    #[error("Usage: {0}")]
    Usage(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// Text to send back to the chat
    pub fn reply(&self) -> String {
        match self {
            CommandError::Internal(_) => INTERNAL_ERROR_REPLY.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => CommandError::NotFound(format!("Not found: {}", what)),
            StorageError::Conflict(what) => CommandError::Conflict(what),
            other => CommandError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        CommandError::Internal(err.to_string())
    }
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated
    #[error("Already exists: {0}")]
    Conflict(String),

    /// Any other constraint, e.g. a dangling foreign key
    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err {
            if code.code == ErrorCode::ConstraintViolation {
                let detail = msg.clone().unwrap_or_else(|| code.to_string());
                return match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        StorageError::Conflict(detail)
                    }
                    _ => StorageError::Constraint(detail),
                };
            }
        }

        match err {
            rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound("no matching row".to_string()),
            other => StorageError::Sqlite(other),
        }
    }
}

/// Password hashing and token signing errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_replies() {
        assert_eq!(
            CommandError::Usage("/stats".to_string()).reply(),
            "Usage: /stats"
        );
        assert_eq!(
            CommandError::NotFound("User not found".to_string()).reply(),
            "User not found"
        );
        assert_eq!(
            CommandError::Internal("disk on fire".to_string()).reply(),
            INTERNAL_ERROR_REPLY
        );
    }

    #[test]
    fn test_storage_error_mapping() {
        let err: CommandError = StorageError::Unavailable("lock poisoned".to_string()).into();
        assert!(matches!(err, CommandError::Internal(_)));

        let err: CommandError = StorageError::Conflict("users.username".to_string()).into();
        assert!(matches!(err, CommandError::Conflict(_)));
    }

    #[test]
    fn test_sqlite_unique_violation_is_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (name TEXT UNIQUE)", []).unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();
        let err = conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap_err();

        assert!(matches!(StorageError::from(err), StorageError::Conflict(_)));
    }

    #[test]
    fn test_sqlite_no_rows_is_not_found() {
        let err = StorageError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
