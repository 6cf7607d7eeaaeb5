//! HTTP transport over the browser's `fetch`.

use gloo_net::http::{Request, Response};
use ingest_uploader::{HttpReply, Transport, TransportError};
use web_sys::FormData;

use crate::types::BrowserFile;

/// [`Transport`] backed by `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    type File = BrowserFile;

    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &BrowserFile,
    ) -> Result<HttpReply, TransportError> {
        let form_data = FormData::new()
            .map_err(|e| TransportError::Request(format!("Failed to create FormData: {:?}", e)))?;

        form_data
            .append_with_blob_and_filename(field, &file.0, &file.0.name())
            .map_err(|e| TransportError::Request(format!("Failed to append file: {:?}", e)))?;

        let request = Request::post(url)
            .body(form_data)
            .map_err(|e| TransportError::Request(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        read_reply(response).await
    }

    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        read_reply(response).await
    }
}

async fn read_reply(response: Response) -> Result<HttpReply, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Body(e.to_string()))?;
    Ok(HttpReply { status, body })
}
