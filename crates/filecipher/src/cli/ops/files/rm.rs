use clap::Args;

use filecipher::state::StateError;
use filecipher::store::{KeyValueStore, StoreError};

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Stored file name, without the key prefix
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FilesRmError {
    #[error("no stored file named {0}")]
    NotFound(String),
    #[error("{0}")]
    State(#[from] StateError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = FilesRmError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = format!("{}{}", ctx.config.store_prefix, self.name);

        let store = ctx.store().await?;
        if !store.remove(&key).await? {
            return Err(FilesRmError::NotFound(self.name.clone()));
        }

        Ok(format!("Removed {}", self.name))
    }
}
