use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use http::StatusCode;

use crate::client::{Reply, Transport, TransportError};
use crate::config::{Action, CipherConfig};
use crate::object_url::ObjectUrls;
use crate::view::{DownloadLink, Notice, ResultArea};

pub const VALIDATION_NOTICE: &str = "Please select a file and enter a key matrix.";
pub const IN_FLIGHT_NOTICE: &str = "A submission is already in progress.";
pub const PROCESSING_TEXT: &str = "Processing...";
pub const SERVER_FAILURE_TEXT: &str = "Error processing file.";
pub const DOWNLOAD_LABEL: &str = "Download processed file";

/// A selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        Ok(Self::new(filename, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub file: Option<FileUpload>,
    pub key_matrix: String,
    pub action: Action,
}

impl SubmissionRequest {
    /// The file and the trimmed key matrix, if both are present.
    pub fn validate(&self) -> Result<(&FileUpload, &str), SubmitError> {
        let key_matrix = self.key_matrix.trim();
        match &self.file {
            Some(file) if !key_matrix.is_empty() => Ok((file, key_matrix)),
            _ => Err(SubmitError::Validation),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{}", VALIDATION_NOTICE)]
    Validation,
    #[error("{}", IN_FLIGHT_NOTICE)]
    InFlight,
    #[error("server answered with status {0}")]
    Server(StatusCode),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl SubmitError {
    /// Blocking notice for errors raised before anything was sent.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitError::Validation => Some(Notice::new(VALIDATION_NOTICE)),
            SubmitError::InFlight => Some(Notice::new(IN_FLIGHT_NOTICE)),
            _ => None,
        }
    }

    /// Text shown in the result area.
    pub fn result_text(&self) -> String {
        match self {
            SubmitError::Server(_) => SERVER_FAILURE_TEXT.to_string(),
            SubmitError::Transport(err) => "Error: ".to_string() + err.message(),
            SubmitError::Endpoint(err) => "Error: ".to_string() + &err.to_string(),
            SubmitError::Validation | SubmitError::InFlight => self.to_string(),
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submits files to the configured service and turns replies into
/// download links.
///
/// Only one submission may be pending per workflow; a second one is
/// refused with [`SubmitError::InFlight`] without touching the network.
pub struct Workflow<T> {
    config: CipherConfig,
    transport: T,
    object_urls: ObjectUrls,
    in_flight: AtomicBool,
}

impl<T: Transport> Workflow<T> {
    pub fn new(config: CipherConfig, transport: T, object_urls: ObjectUrls) -> Self {
        Self {
            config,
            transport,
            object_urls,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn object_urls(&self) -> &ObjectUrls {
        &self.object_urls
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send one submission. Validation happens before anything else, so an
    /// incomplete request never reaches the transport.
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<DownloadLink, SubmitError> {
        let (upload, key_matrix) = request.validate()?;
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::InFlight)?;

        let url = self.config.endpoint(request.action)?;
        tracing::info!(
            action = %request.action,
            filename = %upload.filename,
            size = upload.bytes.len(),
            "submitting to {}",
            url
        );

        match self.transport.post_multipart(&url, upload, key_matrix).await? {
            Reply::Success(body) => {
                tracing::info!("{} returned {} bytes", url, body.len());
                Ok(DownloadLink {
                    href: self.object_urls.create(body),
                    download: self.config.output_filename.clone(),
                    label: DOWNLOAD_LABEL.to_string(),
                })
            }
            Reply::Failure(status) => Err(SubmitError::Server(status)),
        }
    }

    /// Run a submission against the result area.
    ///
    /// Returns a notice when the submission was refused up front; the area is
    /// then left as it was. Otherwise the area ends up holding either the
    /// download link or the failure text.
    pub async fn handle_submit(
        &self,
        request: &SubmissionRequest,
        area: &mut ResultArea,
    ) -> Option<Notice> {
        if let Err(err) = request.validate() {
            tracing::debug!("submission refused: {}", err);
            return err.notice();
        }
        if self.is_in_flight() {
            return SubmitError::InFlight.notice();
        }

        area.set_text(PROCESSING_TEXT);
        match self.submit(request).await {
            Ok(link) => {
                area.set_link(link);
                None
            }
            Err(err) => match err.notice() {
                Some(notice) => Some(notice),
                None => {
                    tracing::warn!("submission failed: {}", err);
                    area.set_text(err.result_text());
                    None
                }
            },
        }
    }
}
