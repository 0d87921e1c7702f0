use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] mongodb::bson::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Unexpected result document: {0}")]
    UnexpectedDocument(String),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
