use thiserror::Error;

#[derive(Debug, Error)]
pub enum HavariError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned HTTP {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode search response at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
