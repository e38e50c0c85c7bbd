//! Error types for the identity store: Railway Programming
//!
//! All store operations return `Result<T, IdentityError>`.
//! No panics, no unwraps in production code paths.

use thiserror::Error;

/// Unified error type for identity store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    // ─── Store Rejections ───

    /// The store refused the operation. Carries one human-readable message
    /// per violated rule.
    #[error("{}", .0.join(" "))]
    Rejected(Vec<String>),

    // ─── Infrastructure Errors ───

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Actor unavailable: {0}")]
    ActorUnavailable(String),
}

impl IdentityError {
    /// Rejection with a single message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(vec![message.into()])
    }

    /// Messages suitable for surfacing next to a form
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Rejected(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(feature = "memory-store")]
impl From<argon2::Error> for IdentityError {
    fn from(err: argon2::Error) -> Self {
        IdentityError::Config(format!("Argon2 parameters: {err}"))
    }
}

#[cfg(feature = "memory-store")]
impl From<argon2::password_hash::Error> for IdentityError {
    fn from(err: argon2::password_hash::Error) -> Self {
        IdentityError::PasswordHash(err.to_string())
    }
}

/// Result type alias for identity store operations
pub type Result<T> = std::result::Result<T, IdentityError>;
