//! Error types for kinobot-store

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unknown channel kind: '{0}' (expected 'mandatory' or 'main')")]
    UnknownChannelKind(String),

    #[error("configuration error: {0}")]
    Config(String),
}
