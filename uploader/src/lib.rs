//! # Ingest Uploader - one upload controller for every data source
//!
//! Each data-source modal of the ingestion app (Gmail credentials, OCR
//! documents, ...) picks one file, POSTs it to the backend and reports the
//! outcome in a status banner. This crate holds that logic once, driven by
//! a [`SourceConfig`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────────┐    ┌─────────────┐
//! │ FileSelector │───▶│   UploadController    │───▶│  Transport  │──▶ POST /ocr, /upload, ...
//! └──────────────┘    │ (state + status + I/O)│    └─────────────┘
//!                     │                       │    ┌─────────────┐
//!  PresentationShell ◀│  subscribe / snapshot │───▶│  Navigator  │──▶ authorization_url
//!                     └───────────────────────┘    └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ingest_uploader::{LocalFile, ReqwestTransport, ServerConfig, SourceConfig, SystemBrowser, UploadController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = SourceConfig::ocr(&ServerConfig::default());
//!     let controller = UploadController::new(source, ReqwestTransport::new().unwrap(), SystemBrowser::new(false));
//!     controller.select_file(Some(LocalFile::read("scan.pdf").await.unwrap()));
//!     controller.submit().await;
//!     println!("{}", controller.snapshot().banner.message());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - the upload-and-status state machine
//! - [`source`] - per-source configuration and presets
//! - [`state`] - modal state and the file-handle trait
//! - [`status`] - banner severity and text
//! - [`transport`] - HTTP seam (`reqwest` implementation behind `native`)
//! - [`navigate`] - full-page navigation seam
//! - [`error`] - error taxonomy

// Core
pub mod error;
pub mod status;
pub mod state;
pub mod source;

// Seams
pub mod transport;
pub mod navigate;

// State machine
pub mod controller;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult, TransportError, UploadError, UploadResult};
pub use status::{StatusBanner, UploadStatus};
pub use state::{SelectedFile, UploadState};
pub use source::{
    FollowUp, ServerConfig, SourceConfig, SourceKind, StatusMessages, DEFAULT_SERVER_URL,
    SERVER_URL_ENV,
};
pub use transport::{HttpReply, Transport};
pub use navigate::Navigator;
pub use controller::{AutoClose, Outcome, StateListener, Submission, UploadController};

#[cfg(feature = "native")]
pub use transport::http::{LocalFile, ReqwestTransport};

#[cfg(feature = "native")]
pub use navigate::SystemBrowser;
