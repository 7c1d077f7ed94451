/**
 * Endpoint configuration: base url, per-action
 *  routes and the name given to downloaded output.
 */
pub mod config;
/**
 * HTTP side of a submission. The single await
 *  point of the workflow lives behind the
 *  `Transport` trait so it can be faked in tests.
 */
pub mod client;
/**
 * Lists stored files under a key prefix
 *  as download links.
 */
pub mod lister;
/**
 * Tracing subscriber setup for the CLI.
 */
pub mod logging;
/**
 * Transient, revocable references to response
 *  bytes held in memory.
 */
pub mod object_url;
/**
 * Download references kept in the store:
 *  data URIs and remote URLs.
 */
pub mod reference;
/**
 * On-disk state: config directory, config.toml
 *  and the store database.
 */
pub mod state;
/**
 * Key/value storage for stored files.
 */
pub mod store;
/**
 * What the user sees: the result area and
 *  the stored-file list.
 */
pub mod view;
/**
 * Validate, upload, and turn the reply into a download.
 */
pub mod workflow;

pub mod prelude {
    pub use crate::client::{HttpTransport, Reply, Transport, TransportError};
    pub use crate::config::{Action, CipherConfig, Routes};
    pub use crate::lister::Lister;
    pub use crate::object_url::{ObjectUrl, ObjectUrls};
    pub use crate::state::{AppConfig, AppState, StateError};
    pub use crate::store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoredFileEntry};
    pub use crate::view::{DownloadLink, FileLink, FileList, Notice, ResultArea, ResultContent};
    pub use crate::workflow::{FileUpload, SubmissionRequest, SubmitError, Workflow};
}
