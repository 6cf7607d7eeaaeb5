//! Status banner model.
//!
//! The banner pairs a severity with the text shown to the user. A banner
//! with any severity other than [`UploadStatus::Unknown`] always carries a
//! message; the `Unknown` banner is always empty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome/severity of the last operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Nothing happened yet
    #[default]
    Unknown,
    /// Upload accepted
    Success,
    /// Informational (e.g. redirect in progress)
    Info,
    /// User error, nothing was sent
    Warning,
    /// Transport or server failure
    Danger,
}

impl UploadStatus {
    /// Lowercase name, also used as the banner CSS modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Unknown => "unknown",
            UploadStatus::Success => "success",
            UploadStatus::Info => "info",
            UploadStatus::Warning => "warning",
            UploadStatus::Danger => "danger",
        }
    }

    /// Fallback text when a non-`Unknown` banner is built from an empty message.
    fn default_text(&self) -> &'static str {
        match self {
            UploadStatus::Unknown => "",
            UploadStatus::Success => "Done",
            UploadStatus::Info => "Working...",
            UploadStatus::Warning => "Check your input",
            UploadStatus::Danger => "Something went wrong",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity plus free text, as rendered by the presentation shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBanner {
    status: UploadStatus,
    message: String,
}

impl StatusBanner {
    /// Build a banner. An `Unknown` status drops the message; any other
    /// status with an empty message gets a generic text.
    pub fn new(status: UploadStatus, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match status {
            UploadStatus::Unknown => String::new(),
            _ if message.trim().is_empty() => status.default_text().to_string(),
            _ => message,
        };
        Self { status, message }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(UploadStatus::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(UploadStatus::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(UploadStatus::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(UploadStatus::Danger, message)
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for the resting banner.
    pub fn is_empty(&self) -> bool {
        self.status == UploadStatus::Unknown
    }
}
