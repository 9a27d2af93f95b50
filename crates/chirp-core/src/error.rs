use thiserror::Error;

/// Outcomes the core reports as failures.
///
/// Absent rows on reads and deletes are not errors; those operations
/// return `Option` / [`crate::DeleteOutcome`] instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
