//! Error type for the fallible edges of the crate: configuration, sprite
//! masks, and persistence. Gameplay itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlappyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid pixel mask: {0}")]
    InvalidMask(String),
}

pub type Result<T> = std::result::Result<T, FlappyError>;
