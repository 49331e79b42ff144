use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetabolabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The feed answered, but not with a success status.
    #[error("Feed unavailable: HTTP {status}")]
    FeedUnavailable { status: u16 },
}

pub type Result<T> = std::result::Result<T, MetabolabError>;
