// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Every failure a user action can hit ends up here and is shown as a single
/// blocking notification; variants only differ in the message they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Non-success HTTP status from the remote API
    Request(String),

    // Transport failure (DNS, connection reset, TLS, ...)
    Network(String),

    // Body was not the JSON we expected
    Decode(String),

    // Domain validation (password mismatch, missing field, self-follow, ...)
    Validation(String),

    // The action needs a logged-in user
    AuthRequired(String),

    // Persistent session storage could not be read or written
    Storage(String),

    // Invalid configuration value
    Config(String),
}

impl AppError {
    /// Text for the user-visible alert.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Request(msg)
            | AppError::Network(msg)
            | AppError::Decode(msg)
            | AppError::Validation(msg)
            | AppError::AuthRequired(msg)
            | AppError::Storage(msg)
            | AppError::Config(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            AppError::Request(_) => "request failed",
            AppError::Network(_) => "network error",
            AppError::Decode(_) => "malformed response",
            AppError::Validation(_) => "invalid input",
            AppError::AuthRequired(_) => "login required",
            AppError::Storage(_) => "storage error",
            AppError::Config(_) => "configuration error",
        };
        write!(f, "{}: {}", kind, self.user_message())
    }
}

impl std::error::Error for AppError {}

/// Converts `reqwest::Error` into the matching variant.
/// Decoding failures surface as `Decode`, everything else as `Network`.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Request(format!("HTTP error! status: {}", status.as_u16()))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
