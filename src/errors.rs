use thiserror::Error;

/// Failure talking to the remote subscriptions API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request could not complete: {0}")]
    Network(String),
    #[error("server rejected request: {0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
