use std::error::Error;
use std::path::PathBuf;

use url::Url;

use filecipher::client::{ClientError, HttpTransport};
use filecipher::config::CipherConfig;
use filecipher::object_url::ObjectUrls;
use filecipher::state::{AppConfig, AppState, StateError};
use filecipher::store::SqliteStore;
use filecipher::workflow::Workflow;

/// Resolve the configuration a command runs with.
///
/// Priority for the service url: explicit `--remote` flag > config file
/// `base_url` > hardcoded http://localhost:8080. Without a config directory
/// every other setting takes its default; a config file that exists but
/// cannot be read is an error.
pub fn resolve_config(
    explicit: Option<Url>,
    config_path: Option<PathBuf>,
) -> Result<AppConfig, StateError> {
    let mut config = match AppState::load(config_path) {
        Ok(state) => state.config,
        Err(StateError::NotInitialized) | Err(StateError::MissingFile(_)) => AppConfig::default(),
        Err(e) => return Err(e),
    };
    if let Some(url) = explicit {
        config.cipher.base_url = url;
    }
    Ok(config)
}


#[derive(Clone)]
pub struct OpContext {
    /// HTTP transport shared by every command
    pub client: HttpTransport,
    /// Resolved endpoint configuration
    pub config: CipherConfig,
    /// Optional custom config path (defaults to ~/.filecipher)
    pub config_path: Option<PathBuf>,
    /// Object urls created during this invocation
    pub object_urls: ObjectUrls,
}

impl OpContext {
    pub fn new(config: CipherConfig, config_path: Option<PathBuf>) -> Result<Self, ClientError> {
        Ok(Self {
            client: HttpTransport::new()?,
            config,
            config_path,
            object_urls: ObjectUrls::new(),
        })
    }

    pub fn workflow(&self) -> Workflow<HttpTransport> {
        Workflow::new(
            self.config.clone(),
            self.client.clone(),
            self.object_urls.clone(),
        )
    }

    /// Open the store of the initialized config directory.
    pub async fn store(&self) -> Result<SqliteStore, StateError> {
        AppState::load(self.config_path.clone())?.open_store().await
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
