//! UI Components for the ingestion app.
//!
//! # Layout Components
//! - [`Header`] - Title bar
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`DataSourcesPanel`] - One button per data source, at most one open modal
//! - [`DataSourceButton`] - Logo + caption opening a modal
//! - [`UploadModal`] - Generic file-upload modal driven by a `SourceConfig`
//! - [`StatusAlert`] - Status banner inside the modal

mod header;
mod footer;
mod source_button;
mod status_alert;
mod upload;
mod sources;

pub use header::*;
pub use footer::*;
pub use source_button::*;
pub use status_alert::*;
pub use upload::*;
pub use sources::*;
