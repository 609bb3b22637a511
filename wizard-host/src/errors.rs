use wizard::GameError;

/// Failures while saving or loading a game snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("save file has no JSON data section")]
    MissingJsonSection,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Timestamp(#[from] time::error::Format),
}

/// Failures while producing commentary.
#[derive(Debug, thiserror::Error)]
pub enum NarratorError {
    #[error("no API key configured for {provider}")]
    MissingKey { provider: &'static str },
    #[error("empty response from {provider}")]
    EmptyResponse { provider: &'static str },
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}
