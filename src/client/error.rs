//! Client-side error types.

use thiserror::Error;

use crate::compile::CompileError;
use crate::config::SettingsError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the execution service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP request could not be performed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request to {path} failed with status {status}")]
    Status { status: u16, path: String },

    /// The response lacks a field the client needs.
    #[error("unexpected response from {path}: missing {field}")]
    MissingField { path: String, field: &'static str },

    /// The response body is not the expected JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The result was still being computed after every poll attempt.
    #[error("result at {url} not ready after {attempts} attempts")]
    PollExhausted { url: String, attempts: u32 },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ClientError {
    pub fn missing(path: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.into(),
            field,
        }
    }

    /// Check if this error came back from the server rather than from the client.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}
