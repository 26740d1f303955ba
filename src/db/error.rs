use thiserror::Error;

/// Errors raised by the trade and document stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Trade validation failed: {0}")]
    Validation(String),

    #[error("Cast to UUID failed for value \"{0}\" at path \"id\"")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
