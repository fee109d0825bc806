use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlossError {
    #[error("Unknown highlight color: {0}")]
    UnknownColor(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),
}

pub type Result<T> = std::result::Result<T, GlossError>;
