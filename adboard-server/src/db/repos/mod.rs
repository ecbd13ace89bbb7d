//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - List operations use window functions for totals (no second COUNT query)
//! - Conflicts go through ON CONFLICT, not check-then-insert
//! - Constraint violations are classified, not stringly matched
//!
//! Writes never run the field validators; enforcement here is whatever the
//! schema constraints provide.

use sqlx::error::ErrorKind;

pub mod ads;
pub mod rubrics;
pub mod tags;
pub mod users;

pub use ads::{Ad, AdRepo, AdTag, TagWithWeight};
pub use rubrics::{Rubric, RubricRepo, RubricWithCount};
pub use tags::{Tag, TagRepo};
pub use users::{Profile, ProfileRepo, User, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Deletion blocked by a RESTRICT foreign key
    #[error("{resource} '{id}' is still referenced")]
    StillReferenced { resource: &'static str, id: String },

    #[error("duplicate {resource}: '{id}'")]
    Duplicate { resource: &'static str, id: String },

    /// A table-level CHECK constraint rejected the write
    #[error("check constraint '{constraint}' violated")]
    CheckViolation { constraint: String },
}

/// Constraint-violation kind of a sqlx error, if it is one.
pub(crate) fn error_kind(e: &sqlx::Error) -> Option<ErrorKind> {
    match e {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    }
}

/// Name of the violated constraint, if the backend reported one.
pub(crate) fn constraint_name(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => db.constraint().map(str::to_owned),
        _ => None,
    }
}
