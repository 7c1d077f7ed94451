use clap::Args;
use url::Url;

use filecipher::config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_FILENAME, DEFAULT_STORE_PREFIX};
use filecipher::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Base URL of the cipher service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Route used for encryption
    #[arg(long, default_value = "encrypt")]
    pub encrypt_route: String,

    /// Route used for decryption
    #[arg(long, default_value = "decrypt")]
    pub decrypt_route: String,

    /// Name processed output is saved under
    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
    pub output_filename: String,

    /// Key prefix for stored files
    #[arg(long, default_value = DEFAULT_STORE_PREFIX)]
    pub prefix: String,

    /// Default log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = AppConfig::default();
        config.cipher.base_url = self.base_url.clone();
        config.cipher.routes.encrypt = self.encrypt_route.clone();
        config.cipher.routes.decrypt = self.decrypt_route.clone();
        config.cipher.output_filename = self.output_filename.clone();
        config.cipher.store_prefix = self.prefix.clone();
        config.log.level = self.log_level.clone();

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;
        let cipher = &state.config.cipher;

        let output = format!(
            "Initialized filecipher directory at: {}\n\
             - Config: {}\n\
             - Store: {}\n\
             - Service: {}\n\
             - Routes: {} / {}\n\
             - Output file: {}\n\
             - Store prefix: {}",
            state.app_dir.display(),
            state.config_path.display(),
            state.store_path.display(),
            cipher.base_url,
            cipher.routes.encrypt,
            cipher.routes.decrypt,
            cipher.output_filename,
            cipher.store_prefix
        );

        Ok(output)
    }
}
