use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to write feed XML: {0}")]
    Write(#[from] std::io::Error),

    #[error("Feed XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
