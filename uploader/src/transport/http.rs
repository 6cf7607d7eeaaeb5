//! `reqwest` transport and on-disk file handle.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use super::{HttpReply, Transport};
use crate::error::TransportError;
use crate::state::SelectedFile;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A file read from disk, ready to be sent as one multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read `path`; the part name is the file name without directories.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { name, bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SelectedFile for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    type File = LocalFile;

    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &LocalFile,
    ) -> Result<HttpReply, TransportError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(field.to_string(), part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        read_reply(response).await
    }

    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        read_reply(response).await
    }
}

async fn read_reply(response: Response) -> Result<HttpReply, TransportError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Body(e.to_string()))?;
    Ok(HttpReply { status, body })
}
