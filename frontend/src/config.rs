//! Application configuration.
//!
//! Centralized configuration for the ingestion frontend.
//! In development, these are hardcoded. In production, they could be
//! injected at build time.

use ingest_uploader::{ServerConfig, SourceConfig, SourceKind};

/// Backend API base URL.
///
/// Serves `/upload_credentials`, `/generate_token`, `/upload` and `/ocr`.
pub const BACKEND_URL: &str = "http://localhost:5000";

/// Application name, shown in the header and the page title.
pub const APP_NAME: &str = "Data Ingestion";

/// Gmail modal variant shown on the page.
///
/// `SourceKind::GmailLegacy` switches back to the plain `/upload` flow.
pub const GMAIL_VARIANT: SourceKind = SourceKind::Gmail;

/// Backend address, falling back to the default on a malformed constant.
pub fn server_config() -> ServerConfig {
    ServerConfig::new(BACKEND_URL).unwrap_or_else(|e| {
        log::error!("Invalid BACKEND_URL, using default: {}", e);
        ServerConfig::default()
    })
}

/// Sources rendered as buttons, in display order.
pub fn data_sources() -> Vec<SourceConfig> {
    let server = server_config();
    [GMAIL_VARIANT, SourceKind::Ocr]
        .iter()
        .map(|kind| kind.config(&server))
        .collect()
}

/// Button logo for a source id, served from the static assets folder.
pub fn logo_for(source_id: &str) -> Option<&'static str> {
    match source_id {
        "gmail" | "gmail-legacy" => Some("/assets/images/gmail-logo.png"),
        "ocr" => Some("/assets/images/ocr-logo.png"),
        _ => None,
    }
}
