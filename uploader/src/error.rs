//! Error types for the upload controller.
//!
//! - [`UploadError`] - everything that can end a submission
//! - [`TransportError`] - the HTTP request itself failed
//! - [`ConfigError`] - invalid source or server configuration
//!
//! Every [`UploadError`] maps to a banner severity and a display text, so
//! no failure ever leaves the controller as an unhandled fault.

use thiserror::Error;

use crate::source::StatusMessages;
use crate::status::UploadStatus;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by a [`crate::Transport`] before a status code is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request could not be built or sent (network down, CORS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Ways a submission can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Submit was triggered before a file was picked.
    #[error("No file selected")]
    NoFileSelected,

    /// The request threw.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        /// `error` field of the JSON body, when the server sent one.
        message: Option<String>,
    },

    /// Token retrieval or the redirect itself failed.
    #[error("Authorization failed: {0}")]
    Authorization(String),
}

impl UploadError {
    /// Banner severity for this failure.
    pub fn severity(&self) -> UploadStatus {
        match self {
            UploadError::NoFileSelected => UploadStatus::Warning,
            _ => UploadStatus::Danger,
        }
    }

    /// User-facing text, built from the source's configured copy.
    pub fn banner_text(&self, messages: &StatusMessages) -> String {
        match self {
            UploadError::NoFileSelected => messages.no_file.clone(),
            UploadError::Server { message: Some(detail), .. } => {
                format!("{}: {}", messages.upload_failed, detail)
            }
            UploadError::Server { message: None, .. } => messages.upload_failed.clone(),
            UploadError::Transport(_) => messages.transport_failed.clone(),
            UploadError::Authorization(_) => messages.auth_failed.clone(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid source or server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Server base URL is empty.
    #[error("Server URL must not be empty")]
    EmptyBaseUrl,

    /// Server base URL has no http/https scheme.
    #[error("Server URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),

    /// No preset with this name.
    #[error("Unknown data source '{0}' (expected one of: gmail, gmail-legacy, ocr)")]
    UnknownSource(String),

    /// A custom source definition could not be parsed.
    #[error("Invalid source definition: {0}")]
    InvalidSource(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
