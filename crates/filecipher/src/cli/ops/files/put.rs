use std::path::PathBuf;

use clap::Args;

use filecipher::reference::to_data_uri;
use filecipher::state::StateError;
use filecipher::store::{KeyValueStore, StoreError};
use filecipher::workflow::FileUpload;

#[derive(Args, Debug, Clone)]
pub struct Put {
    /// File to keep in the store
    pub path: PathBuf,

    /// Name to store it under (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FilesPutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    State(#[from] StateError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Put {
    type Error = FilesPutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let upload = FileUpload::read(&self.path).await?;
        let name = self.name.clone().unwrap_or(upload.filename);

        let mime_type = mime_guess::from_path(&name).first_or_octet_stream();
        let key = format!("{}{}", ctx.config.store_prefix, name);

        let store = ctx.store().await?;
        store
            .set(&key, &to_data_uri(mime_type.as_ref(), &upload.bytes))
            .await?;

        Ok(format!(
            "Stored {} ({} bytes, {}) as {}",
            name,
            upload.bytes.len(),
            mime_type,
            key
        ))
    }
}
