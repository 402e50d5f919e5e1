use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Item already exists: {0}")]
    ItemAlreadyExists(String),

    #[error("Failed to update item: {0}")]
    UpdateFailed(String),

    #[error("No update found: {0}")]
    NoUpdateFound(String),

    #[error("Failed to deserialize row: {0}")]
    FailedToDeserializeRow(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
}
