//! Errors raised while fetching or decoding provider data.

use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}
