use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_OUTPUT_FILENAME: &str = "output.txt";
pub const DEFAULT_STORE_PREFIX: &str = "file_";

/// Which server-side operation a submission asks for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Encrypt => "encrypt",
            Action::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route names appended to the base url, one per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    #[serde(default = "default_encrypt_route")]
    pub encrypt: String,
    #[serde(default = "default_decrypt_route")]
    pub decrypt: String,
}

fn default_encrypt_route() -> String {
    Action::Encrypt.as_str().to_string()
}

fn default_decrypt_route() -> String {
    Action::Decrypt.as_str().to_string()
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            encrypt: default_encrypt_route(),
            decrypt: default_decrypt_route(),
        }
    }
}

impl Routes {
    pub fn route(&self, action: Action) -> &str {
        match action {
            Action::Encrypt => &self.encrypt,
            Action::Decrypt => &self.decrypt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherConfig {
    /// Service the file is uploaded to
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Name offered for the downloaded reply, whatever its content type
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    /// Key prefix marking stored files
    #[serde(default = "default_store_prefix")]
    pub store_prefix: String,
    #[serde(default)]
    pub routes: Routes,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("hardcoded URL must parse")
}

fn default_output_filename() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}

fn default_store_prefix() -> String {
    DEFAULT_STORE_PREFIX.to_string()
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_filename: default_output_filename(),
            store_prefix: default_store_prefix(),
            routes: Routes::default(),
        }
    }
}

impl CipherConfig {
    /// The url a submission for `action` is posted to.
    ///
    /// The route is appended to the base url as a path segment, keeping
    /// any path the base url already has.
    pub fn endpoint(&self, action: Action) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.routes.route(action).trim_start_matches('/')
        ))
    }
}
