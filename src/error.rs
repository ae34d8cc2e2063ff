use std::sync::Arc;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, WordNetError>;

/// Enum representing all possible errors in the wordnet_lite library.
#[derive(Error, Debug)]
pub enum WordNetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Required data file not found: {0}")]
    DataFileNotFound(String),

    #[error("Inconsistent dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("WordNet data not loaded")]
    NotLoaded,

    /// A coalesced load failed; every caller waiting on it shares the cause.
    #[error("Loading WordNet failed: {0}")]
    LoadFailed(Arc<WordNetError>),
}
