use std::env;
use std::path::PathBuf;

use clap::Args;

use filecipher::reference::{self, ReferenceError};
use filecipher::state::StateError;
use filecipher::store::{KeyValueStore, StoreError};

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Stored file name, without the key prefix
    pub name: String,

    /// Directory to save into (defaults to the current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum FilesGetError {
    #[error("no stored file named {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    State(#[from] StateError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Reference(#[from] ReferenceError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = FilesGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = format!("{}{}", ctx.config.store_prefix, self.name);

        let store = ctx.store().await?;
        let value = store
            .get(&key)
            .await?
            .ok_or_else(|| FilesGetError::NotFound(self.name.clone()))?;

        let bytes = reference::resolve(&value, &ctx.client).await?;

        let out_dir = match &self.out {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        tokio::fs::create_dir_all(&out_dir).await?;
        let path = out_dir.join(&self.name);
        tokio::fs::write(&path, &bytes).await?;

        Ok(format!("Saved {} ({} bytes)", path.display(), bytes.len()))
    }
}
