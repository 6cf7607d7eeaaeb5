//! Browser implementations of the uploader's seams.
//!
//! # Services
//!
//! - [`upload`] - multipart upload and GET through `fetch` (`gloo-net`)
//! - [`navigation`] - full-page redirect through `window.location`

pub mod upload;
pub mod navigation;

pub use upload::*;
pub use navigation::*;
