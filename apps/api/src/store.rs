//! Error type shared by the Postgres-backed stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violated on insert. Carries the entity name.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Update targeted a row that does not exist. Carries the entity name.
    #[error("{0} not found")]
    NotFound(String),

    /// A stored row failed to decode into its domain type.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// Classifies a failed INSERT: unique violations become `AlreadyExists(entity)`.
    pub fn on_insert(entity: &str, e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::AlreadyExists(entity.to_string())
            }
            _ => StoreError::Database(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}
