//! Workflow error taxonomy
//!
//! Every variant knows the messages it shows next to the originating form;
//! see [`AdminError::messages`].

use serde::Serialize;
use thiserror::Error;

use crate::error::IdentityError;

/// Which kind of entity an operation addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Role,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one administrative operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Malformed input, caught before any store call
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} {id} already has a claim of type {claim_type}")]
    DuplicateClaim {
        kind: EntityKind,
        id: String,
        claim_type: String,
    },

    #[error("{kind} {id} has no claim of type {claim_type}")]
    ClaimNotFound {
        kind: EntityKind,
        id: String,
        claim_type: String,
    },

    // ─── Store Rejections ───

    #[error("Could not create {kind}: {}", .reasons.join(" "))]
    Creation { kind: EntityKind, reasons: Vec<String> },

    #[error("{headline}")]
    Update { headline: String, reasons: Vec<String> },

    #[error("{headline}")]
    Delete { headline: String, reasons: Vec<String> },

    #[error("Membership change failed: {}", .reasons.join(" "))]
    Membership { reasons: Vec<String> },

    /// Store failure outside the rejection path (e.g. store unavailable)
    #[error("Identity store error: {0}")]
    Store(#[from] IdentityError),
}

impl AdminError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Messages shown next to the form that triggered the failure
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::NotFound { kind: EntityKind::User, .. } => {
                vec!["This user can't be found".into()]
            }
            Self::NotFound { kind: EntityKind::Role, .. } => {
                vec!["This role can't be found.".into()]
            }
            Self::DuplicateClaim { kind, .. } => vec![format!(
                "{} already has this claim, no update was executed.",
                capitalized(*kind)
            )],
            Self::ClaimNotFound { kind: EntityKind::User, .. } => vec![
                "The current claim for this user does not exist. No need to remove it from him!"
                    .into(),
            ],
            Self::ClaimNotFound { kind: EntityKind::Role, .. } => vec![
                "The current claim for this role does not exist. No need to remove it!".into(),
            ],
            Self::Creation { reasons, .. } | Self::Membership { reasons } => reasons.clone(),
            Self::Update { headline, reasons } | Self::Delete { headline, reasons } => {
                std::iter::once(headline.clone())
                    .chain(reasons.iter().cloned())
                    .collect()
            }
            Self::Store(err) => err.messages(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn capitalized(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => "User",
        EntityKind::Role => "Role",
    }
}
