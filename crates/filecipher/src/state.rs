use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::CipherConfig;
use crate::store::{SqliteStore, StoreError};

pub const APP_NAME: &str = "filecipher";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const STORE_FILE_NAME: &str = "store.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily log files (stderr only if not set)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LogConfig {
    /// Parsed level, falling back to WARN on anything unrecognised.
    pub fn level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::WARN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cipher: CipherConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the state directory (~/.filecipher)
    pub app_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the SQLite store, created on first open
    pub store_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the state directory path (custom or default ~/.filecipher)
    pub fn app_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(custom_path)?;

        let config_path = app_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&app_dir)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            store_path: app_dir.join(STORE_FILE_NAME),
            app_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the state directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(custom_path)?;

        if !app_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = app_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            store_path: app_dir.join(STORE_FILE_NAME),
            app_dir,
            config_path,
            config,
        })
    }

    pub async fn open_store(&self) -> Result<SqliteStore, StateError> {
        Ok(SqliteStore::new(&self.store_path).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("filecipher directory not initialized. Run 'filecipher init' first")]
    NotInitialized,

    #[error("filecipher directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
