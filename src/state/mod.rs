pub mod forum;

pub use forum::{ForumThread, GroupInfo, PanelPhase, PanelState};

use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
