use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Coarse classification of a [`ServiceError`], compared by equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

/// One human readable message per violated rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", .errors.join(", "))]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

impl ValidationErrors {
    pub fn single(message: impl Into<String>) -> Self {
        Self { errors: vec![message.into()] }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }
}

/// Failure reported by a storage adapter. The message is internal detail and
/// must never reach API callers.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(String);

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(e: sea_orm::DbErr) -> Self { Self(e.to_string()) }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
    /// Part of the taxonomy for callers that treat absence as an error;
    /// the services themselves report missing rows as `None`.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(message))
    }

    /// Wrap a storage failure with the name of the operation that failed.
    pub fn storage(op: &'static str, source: StorageError) -> Self {
        error!(op, error = %source, "storage operation failed");
        Self::Storage { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Storage { .. } => ErrorKind::Storage,
        }
    }
}
