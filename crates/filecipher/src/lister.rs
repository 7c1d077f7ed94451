use crate::store::{KeyValueStore, StoreError};
use crate::view::{FileLink, FileList};

/// Renders the stored files found under a key prefix.
#[derive(Debug, Clone)]
pub struct Lister<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> Lister<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Clear `list` and fill it with one link per matching entry, in store
    /// order. The link points at the stored value and is labelled with the
    /// key minus the prefix.
    pub async fn refresh(&self, list: &mut FileList) -> Result<(), StoreError> {
        list.clear();

        for entry in self.store.list(&self.prefix).await? {
            if let Some(name) = entry.name(&self.prefix) {
                list.push(FileLink::new(name, entry.value.clone()));
            }
        }

        tracing::debug!("listed {} stored file(s)", list.len());
        Ok(())
    }
}
