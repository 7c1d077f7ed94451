mod client;
mod error;

use bytes::Bytes;
use http::StatusCode;
use url::Url;

use crate::workflow::FileUpload;

pub use client::HttpTransport;
pub use error::{ClientError, TransportError};

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the key matrix text.
pub const KEY_MATRIX_FIELD: &str = "keyMatrix";

/// What came back from the service once the request completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 2xx, with the full body
    Success(Bytes),
    /// Any other status. The body is not read.
    Failure(StatusCode),
}

/// Sends one submission and waits for the reply.
///
/// `Err` means the request never completed (unreachable host, refused
/// connection, broken body); an HTTP response of any status is a `Reply`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post_multipart(
        &self,
        url: &Url,
        upload: &FileUpload,
        key_matrix: &str,
    ) -> Result<Reply, TransportError>;
}
