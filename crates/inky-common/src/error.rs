//! Error types for the inky-pi crates.

use thiserror::Error;

/// Result type alias using InkyError.
pub type InkyResult<T> = Result<T, InkyError>;

/// Primary error type for data formatting and rendering.
#[derive(Debug, Error)]
pub enum InkyError {
    // === Value Errors ===
    #[error("Value out of physical domain: {0}")]
    OutOfDomain(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("Data not available: {0}")]
    DataUnavailable(String),

    #[error("Unknown weather icon code: '{0}'")]
    UnknownIconCode(String),

    // === Backend Errors ===
    #[error("Display backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl InkyError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        InkyError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether a renderer may swap this error for an inline placeholder
    /// instead of abandoning the frame.
    pub fn is_field_level(&self) -> bool {
        matches!(
            self,
            InkyError::OutOfDomain(_)
                | InkyError::InvalidParameter { .. }
                | InkyError::DataUnavailable(_)
                | InkyError::UnknownIconCode(_)
        )
    }

    /// Short machine-readable name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            InkyError::OutOfDomain(_) => "out_of_domain",
            InkyError::InvalidParameter { .. } => "invalid_parameter",
            InkyError::DataUnavailable(_) => "data_unavailable",
            InkyError::UnknownIconCode(_) => "unknown_icon_code",
            InkyError::BackendUnavailable(_) => "backend_unavailable",
            InkyError::Render(_) => "render",
            InkyError::Config(_) => "config",
            InkyError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for InkyError {
    fn from(err: std::io::Error) -> Self {
        InkyError::Io(err.to_string())
    }
}
