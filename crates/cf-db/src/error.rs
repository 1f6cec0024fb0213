//! Database error types

use thiserror::Error;

/// Errors surfaced by the database layer
#[derive(Debug, Error)]
pub enum DbError {
    #[error("no row returned where exactly one was expected")]
    RowNotFound,

    #[error("multiple rows returned where exactly one was expected")]
    MultipleRows,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;
