use std::fmt;
use std::path::{Path, PathBuf};

use crate::object_url::{ObjectUrl, ObjectUrls};

/// Class carried by every stored-file link.
pub const FILE_ITEM_CLASS: &str = "file-item";

/// A blocking message the user has to acknowledge. Nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("object url {0} has been revoked")]
    Revoked(ObjectUrl),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Link to a processed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: ObjectUrl,
    /// File name the bytes are saved under
    pub download: String,
    pub label: String,
}

impl DownloadLink {
    /// Save the referenced bytes as `dir/<download>`.
    pub async fn activate(&self, urls: &ObjectUrls, dir: &Path) -> Result<PathBuf, DownloadError> {
        let bytes = urls
            .resolve(&self.href)
            .ok_or_else(|| DownloadError::Revoked(self.href.clone()))?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.download);
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!("saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultContent {
    #[default]
    Empty,
    Text(String),
    Link(DownloadLink),
}

/// Status area of a submission. Every update replaces what was there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultArea {
    content: ResultContent,
}

impl ResultArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = ResultContent::Text(text.into());
    }

    pub fn set_link(&mut self, link: DownloadLink) {
        self.content = ResultContent::Link(link);
    }

    pub fn content(&self) -> &ResultContent {
        &self.content
    }

    /// Visible text: the message, or the label of the link.
    pub fn text(&self) -> &str {
        match &self.content {
            ResultContent::Empty => "",
            ResultContent::Text(text) => text,
            ResultContent::Link(link) => &link.label,
        }
    }

    pub fn links(&self) -> Vec<&DownloadLink> {
        match &self.content {
            ResultContent::Link(link) => vec![link],
            _ => Vec::new(),
        }
    }
}

/// One stored file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLink {
    /// Stored download reference, used as is
    pub href: String,
    pub download: String,
    pub label: String,
    pub class: &'static str,
}

impl FileLink {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            href: href.into(),
            download: name.clone(),
            label: name,
            class: FILE_ITEM_CLASS,
        }
    }
}

/// Container for stored-file links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    links: Vec<FileLink>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn push(&mut self, link: FileLink) {
        self.links.push(link);
    }

    pub fn links(&self) -> &[FileLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// One label per line, each followed by a line break.
impl fmt::Display for FileList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for link in &self.links {
            writeln!(f, "{}", link.label)?;
        }
        Ok(())
    }
}
