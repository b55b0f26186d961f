pub mod sqlite;
pub mod repository;

pub use sqlite::*;
pub use repository::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Stale {entity_type} {id}: expected version {expected}, stored version is {actual}")]
    Conflict {
        entity_type: String,
        id: String,
        expected: i64,
        actual: i64,
    },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Persistence,
}

impl DatabaseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Sqlite(_)
            | Self::MigrationFailed { .. }
            | Self::ConstraintViolation(_)
            | Self::Io(_) => ErrorKind::Persistence,
        }
    }

    /// Message shown to a person editing records, distinct per kind.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotFound => {
                "This record no longer exists. Refresh the list and try again.".into()
            }
            ErrorKind::Conflict => {
                "Someone else changed this record. Refresh to see the latest version before editing."
                    .into()
            }
            ErrorKind::Persistence => format!("The database rejected the request: {self}"),
        }
    }
}
