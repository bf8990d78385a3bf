use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to upstream failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream answered with status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is missing the `{0}` path")]
    MissingPath(&'static str),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a failed refresh cycle, naming the stage that failed so the
/// boundary can log and react per kind.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("fetch stage failed: {0}")]
    Transport(#[from] TransportError),
    #[error("normalize stage failed: {0}")]
    Parse(#[from] ParseError),
    #[error("store stage failed: {0}")]
    Store(#[from] CacheError),
    #[error("refresh task stopped before reporting an outcome")]
    Interrupted,
}
