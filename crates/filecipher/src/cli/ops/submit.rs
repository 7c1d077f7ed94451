use std::env;
use std::path::PathBuf;

use clap::Args;

use filecipher::config::Action;
use filecipher::reference::to_data_uri;
use filecipher::state::StateError;
use filecipher::store::{KeyValueStore, StoreError};
use filecipher::view::{DownloadError, DownloadLink, ResultArea, ResultContent};
use filecipher::workflow::{FileUpload, SubmissionRequest};

#[derive(Args, Debug, Clone)]
pub struct Submit {
    /// Operation to ask the service for
    #[arg(long, value_enum)]
    pub action: Action,

    /// File to upload
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Key matrix forwarded to the service, e.g. "6,24,1;13,16,10;20,17,15"
    #[arg(long, default_value = "")]
    pub key_matrix: String,

    /// Directory the output is saved to (defaults to the current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also keep the output in the local store
    #[arg(long)]
    pub store: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitOpError {
    #[error("{0}")]
    Notice(String),
    #[error("{0}")]
    Failed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),
    #[error("{0}")]
    State(#[from] StateError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{saved}\nNot stored: {source}")]
    NotStored {
        saved: String,
        source: Box<SubmitOpError>,
    },
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Submit {
    type Error = SubmitOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let file = match &self.file {
            Some(path) => Some(FileUpload::read(path).await?),
            None => None,
        };
        let request = SubmissionRequest {
            file,
            key_matrix: self.key_matrix.clone(),
            action: self.action,
        };

        let workflow = ctx.workflow();
        let mut area = ResultArea::new();
        if let Some(notice) = workflow.handle_submit(&request, &mut area).await {
            return Err(SubmitOpError::Notice(notice.to_string()));
        }

        let link = match area.content() {
            ResultContent::Link(link) => link.clone(),
            _ => return Err(SubmitOpError::Failed(area.text().to_string())),
        };

        let out_dir = match &self.out {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        let saved = link.activate(&ctx.object_urls, &out_dir).await;

        let stored = match (&saved, self.store) {
            (Ok(_), true) => Some(store_output(ctx, &link).await),
            _ => None,
        };

        // nothing refers to the bytes past this point
        ctx.object_urls.revoke(&link.href);

        let mut output = format!("{}: {}", link.label, saved?.display());
        match stored {
            Some(Ok(key)) => output.push_str(&format!("\nStored as: {}", key)),
            Some(Err(e)) => {
                return Err(SubmitOpError::NotStored {
                    saved: output,
                    source: Box::new(e),
                })
            }
            None => {}
        }
        Ok(output)
    }
}

/// Keep a processed reply in the store as a data URI under
/// `prefix + download name`.
async fn store_output(
    ctx: &crate::cli::op::OpContext,
    link: &DownloadLink,
) -> Result<String, SubmitOpError> {
    let bytes = ctx
        .object_urls
        .resolve(&link.href)
        .ok_or_else(|| DownloadError::Revoked(link.href.clone()))?;
    let mime_type = mime_guess::from_path(&link.download).first_or_octet_stream();
    let key = format!("{}{}", ctx.config.store_prefix, link.download);

    let store = ctx.store().await?;
    store
        .set(&key, &to_data_uri(mime_type.as_ref(), &bytes))
        .await?;
    Ok(key)
}
