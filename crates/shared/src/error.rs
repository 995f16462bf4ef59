//! Error types for Kage

use kage_domain::RepositoryError;
use thiserror::Error;

/// Why an actor was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The operation needs the elevated role
    MissingRole,
    /// The actor is not on the mission's team
    NotAssignee,
    /// The record belongs to someone else
    NotOwner,
    /// The request touches fields the actor may not change
    FieldScope,
    /// A high-risk mission would be left without a senior ninja
    HighRiskStaffing,
}

/// Error thrown when role, ownership or field scope forbids an operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AccessDeniedError {
    pub reason: DenialReason,
    pub message: String,
}

impl AccessDeniedError {
    pub fn new(reason: DenialReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }
}

/// Coarse classification used to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    AccessDenied,
    Validation,
    Unauthenticated,
    Internal,
}

/// General Kage error type
#[derive(Debug, Error)]
pub enum KageError {
    #[error("{entity} not found with ID: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    AccessDenied(#[from] AccessDeniedError),

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl KageError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        KageError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        KageError::Conflict(message.into())
    }

    pub fn denied(reason: DenialReason, message: impl Into<String>) -> Self {
        KageError::AccessDenied(AccessDeniedError::new(reason, message))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            KageError::NotFound { .. } => ErrorKind::NotFound,
            KageError::Conflict(_) => ErrorKind::Conflict,
            KageError::AccessDenied(_) => ErrorKind::AccessDenied,
            KageError::Validation(_) => ErrorKind::Validation,
            KageError::Unauthenticated => ErrorKind::Unauthenticated,
            KageError::Repository(RepositoryError::NotFound { .. }) => ErrorKind::NotFound,
            KageError::Repository(_)
            | KageError::Config(_)
            | KageError::Io(_)
            | KageError::Json(_)
            | KageError::Yaml(_) => ErrorKind::Internal,
        }
    }

    /// The denial reason, for access-denied errors
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            KageError::AccessDenied(e) => Some(e.reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(KageError::not_found("Mission", 3).kind(), ErrorKind::NotFound);
        assert_eq!(KageError::conflict("taken").kind(), ErrorKind::Conflict);
        assert_eq!(
            KageError::denied(DenialReason::FieldScope, "no").kind(),
            ErrorKind::AccessDenied
        );
        assert_eq!(
            KageError::Repository(RepositoryError::persistence("lock")).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            KageError::not_found("Mission", 42).to_string(),
            "Mission not found with ID: 42"
        );
        assert_eq!(
            KageError::Validation(vec!["Title cannot be empty".into(), "Bad email".into()])
                .to_string(),
            "Title cannot be empty, Bad email"
        );
        let denied = KageError::denied(DenialReason::MissingRole, "Only a Kage can do that");
        assert_eq!(denied.to_string(), "Only a Kage can do that");
        assert_eq!(denied.denial_reason(), Some(DenialReason::MissingRole));
    }
}
