use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse task file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Invalid task '{id}': {reason}")]
    InvalidTask { id: String, reason: String },
    #[error("Serde error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
