use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PupstubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Socket error: {0}")]
    Socket(String),

    #[error("Socket bound to a non-TCP endpoint: {0}")]
    UnexpectedEndpoint(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Empty launcher command")]
    EmptyCommand,

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcript error: {path}: {source}")]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operator input closed")]
    OperatorClosed,
}

pub type Result<T> = std::result::Result<T, PupstubError>;
