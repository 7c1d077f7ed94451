use clap::Args;

use filecipher::lister::Lister;
use filecipher::state::StateError;
use filecipher::store::StoreError;
use filecipher::view::{FileLink, FileList};

/// Longest reference shown before it gets cut
const MAX_HREF_DISPLAY: usize = 48;

#[derive(Args, Debug, Clone)]
pub struct Ls;

#[derive(Debug, thiserror::Error)]
pub enum FilesLsError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

fn describe(link: &FileLink) -> String {
    let href = if link.href.chars().count() > MAX_HREF_DISPLAY {
        let cut: String = link.href.chars().take(MAX_HREF_DISPLAY).collect();
        format!("{}...", cut)
    } else {
        link.href.clone()
    };
    format!("{} -> {}", link.label, href)
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = FilesLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let store = ctx.store().await?;
        let lister = Lister::new(store, ctx.config.store_prefix.clone());

        let mut list = FileList::new();
        lister.refresh(&mut list).await?;

        if list.is_empty() {
            Ok("No stored files found".to_string())
        } else {
            Ok(list
                .links()
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
