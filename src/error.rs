use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookbotError {
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed completion response: {0}")]
    ResponseError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timeout - no data received for {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for BookbotError {
    fn from(err: anyhow::Error) -> Self {
        BookbotError::Other(format!("{:#}", err))
    }
}

impl From<String> for BookbotError {
    fn from(msg: String) -> Self {
        BookbotError::Other(msg)
    }
}

impl From<&str> for BookbotError {
    fn from(msg: &str) -> Self {
        BookbotError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookbotError>;
