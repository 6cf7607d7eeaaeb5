//! Data-source configuration.
//!
//! Every modal runs the same [`crate::UploadController`]; what differs
//! between Gmail, OCR and friends is captured here as plain data.
//!
//! # Presets
//!
//! | Source         | Upload endpoint             | Follow-up                     | Auto-close |
//! |----------------|-----------------------------|-------------------------------|------------|
//! | `gmail`        | `POST /upload_credentials`  | `GET /generate_token` redirect | no         |
//! | `gmail-legacy` | `POST /upload`              | none                          | no         |
//! | `ocr`          | `POST /ocr`                 | none                          | 3 s        |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "INGEST_SERVER_URL";

/// Multipart field name every observed endpoint expects.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Placeholder replaced by the file name in success templates.
pub const FILE_PLACEHOLDER: &str = "{file}";

// =============================================================================
// Server
// =============================================================================

/// Base address of the ingestion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    base_url: String,
}

impl ServerConfig {
    /// Validate and normalize a base URL (trailing slashes are dropped).
    pub fn new(base_url: impl AsRef<str>) -> ConfigResult<Self> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Read [`SERVER_URL_ENV`], falling back to [`DEFAULT_SERVER_URL`].
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) => Self::new(url),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

// =============================================================================
// Source
// =============================================================================

/// Banner copy for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    pub no_file: String,
    pub upload_failed: String,
    /// Request never reached the server or its reply was unreadable
    pub transport_failed: String,
    pub auth_failed: String,
    pub redirecting: String,
    /// Submit while a request from a closed session is still running
    pub still_finishing: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            no_file: "Please select a file before submitting".to_string(),
            upload_failed: "Error uploading file".to_string(),
            transport_failed: "Could not reach the server".to_string(),
            auth_failed: "Error during authentication".to_string(),
            redirecting: "Redirecting to the authorization page...".to_string(),
            still_finishing: "An earlier upload is still finishing, try again in a moment"
                .to_string(),
        }
    }
}

/// Step chained after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowUp {
    /// GET `token_endpoint`, read `authorization_url`, navigate there.
    Authorize { token_endpoint: String },
}

/// Everything that distinguishes one data-source modal from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier (`gmail`, `ocr`, ...)
    pub id: String,
    /// Button caption
    pub title: String,
    /// Heading shown inside the modal
    pub prompt: String,
    /// Absolute upload URL
    pub endpoint: String,
    /// Multipart field carrying the file
    #[serde(default = "default_file_field")]
    pub file_field: String,
    /// Success text; `{file}` is replaced by the file name
    pub success_template: String,
    /// Submit button caption
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    #[serde(default)]
    pub messages: StatusMessages,
    #[serde(default)]
    pub follow_up: Option<FollowUp>,
    /// Close the modal this long after a terminal status
    #[serde(default)]
    pub auto_close_ms: Option<u64>,
}

fn default_file_field() -> String {
    DEFAULT_FILE_FIELD.to_string()
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

impl SourceConfig {
    /// Gmail credentials upload followed by the OAuth redirect.
    pub fn gmail(server: &ServerConfig) -> Self {
        Self {
            id: SourceKind::Gmail.to_string(),
            title: "Gmail".to_string(),
            prompt: "Upload your gmail credentials".to_string(),
            endpoint: server.join("/upload_credentials"),
            file_field: default_file_field(),
            success_template: "File {file} uploaded successfully".to_string(),
            submit_label: default_submit_label(),
            messages: StatusMessages::default(),
            follow_up: Some(FollowUp::Authorize {
                token_endpoint: server.join("/generate_token"),
            }),
            auto_close_ms: None,
        }
    }

    /// Older Gmail modal: plain upload, no redirect.
    pub fn gmail_legacy(server: &ServerConfig) -> Self {
        Self {
            id: SourceKind::GmailLegacy.to_string(),
            endpoint: server.join("/upload"),
            follow_up: None,
            ..Self::gmail(server)
        }
    }

    /// Document upload for OCR processing.
    pub fn ocr(server: &ServerConfig) -> Self {
        Self {
            id: SourceKind::Ocr.to_string(),
            title: "OCR".to_string(),
            prompt: "Upload a document for OCR".to_string(),
            endpoint: server.join("/ocr"),
            file_field: default_file_field(),
            success_template: "File {file} uploaded successfully".to_string(),
            submit_label: default_submit_label(),
            messages: StatusMessages::default(),
            follow_up: None,
            auto_close_ms: Some(3_000),
        }
    }

    /// Parse a custom source definition.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn auto_close(&self) -> Option<Duration> {
        self.auto_close_ms.map(Duration::from_millis)
    }

    /// Success text for `file_name`.
    pub fn success_message(&self, file_name: &str) -> String {
        if self.success_template.contains(FILE_PLACEHOLDER) {
            self.success_template.replace(FILE_PLACEHOLDER, file_name)
        } else {
            format!("{} ({})", self.success_template, file_name)
        }
    }
}

// =============================================================================
// Preset selection
// =============================================================================

/// Built-in sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Gmail,
    GmailLegacy,
    Ocr,
}

impl SourceKind {
    pub fn all() -> &'static [SourceKind] {
        &[SourceKind::Gmail, SourceKind::GmailLegacy, SourceKind::Ocr]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Gmail => "gmail",
            SourceKind::GmailLegacy => "gmail-legacy",
            SourceKind::Ocr => "ocr",
        }
    }

    pub fn config(&self, server: &ServerConfig) -> SourceConfig {
        match self {
            SourceKind::Gmail => SourceConfig::gmail(server),
            SourceKind::GmailLegacy => SourceConfig::gmail_legacy(server),
            SourceKind::Ocr => SourceConfig::ocr(server),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted || kind.as_str().replace('-', "_") == wanted)
            .ok_or_else(|| ConfigError::UnknownSource(s.to_string()))
    }
}
