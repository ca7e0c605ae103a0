use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhDashError {
    #[error("GitHub API error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GhDashError>;
