//! HTTP seam between the controller and the network.
//!
//! The controller never talks to an HTTP client directly. A [`Transport`]
//! sends one multipart POST or one GET and hands back the raw
//! [`HttpReply`]; interpreting status codes and JSON bodies stays in the
//! controller so every transport behaves the same.
//!
//! - [`http`] - `reqwest` transport for native targets (feature `native`)
//! - the browser transport lives in the frontend crate (`gloo-net`)

#[cfg(feature = "native")]
pub mod http;

use serde_json::Value;

use crate::error::TransportError;
use crate::state::SelectedFile;

/// Status code and body of a settled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as JSON, `None` when it is not JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// String field of a JSON object body.
    pub fn string_field(&self, name: &str) -> Option<String> {
        self.json()?
            .get(name)?
            .as_str()
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    }

    /// The server's `error` field, when present.
    pub fn error_field(&self) -> Option<String> {
        self.string_field("error")
    }
}

/// Sends requests on behalf of an [`crate::UploadController`].
///
/// Implementations must not interpret status codes: a 500 is an `Ok`
/// reply, only a request that never produced a status is an `Err`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// File handle this transport knows how to encode.
    type File: SelectedFile;

    /// POST `file` as multipart field `field`.
    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<HttpReply, TransportError>;

    /// Plain GET.
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;
}
