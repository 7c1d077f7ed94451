use bytes::Bytes;
use reqwest::{multipart, Client};
use url::Url;

use super::error::{ClientError, TransportError};
use super::{Reply, Transport, FILE_FIELD, KEY_MATRIX_FIELD};
use crate::workflow::FileUpload;

/// reqwest-backed transport. No custom headers, no timeout beyond the
/// client defaults.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Plain GET for remote download references.
    pub async fn get_bytes(&self, url: &Url) -> Result<Bytes, ClientError> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status()));
        }

        Ok(response.bytes().await?)
    }
}

fn build_form(upload: &FileUpload, key_matrix: &str) -> Result<multipart::Form, reqwest::Error> {
    let mime_type = mime_guess::from_path(&upload.filename).first_or_octet_stream();
    let file_part = multipart::Part::bytes(upload.bytes.to_vec())
        .file_name(upload.filename.clone())
        .mime_str(mime_type.as_ref())?;

    Ok(multipart::Form::new()
        .part(FILE_FIELD, file_part)
        .text(KEY_MATRIX_FIELD, key_matrix.to_string()))
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_multipart(
        &self,
        url: &Url,
        upload: &FileUpload,
        key_matrix: &str,
    ) -> Result<Reply, TransportError> {
        let form = build_form(upload, key_matrix)?;

        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("request to {} failed: {}", url, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered with status {}", url, status);
            return Ok(Reply::Failure(status));
        }

        let body = response.bytes().await?;
        tracing::debug!("received {} bytes from {}", body.len(), url);
        Ok(Reply::Success(body))
    }
}
