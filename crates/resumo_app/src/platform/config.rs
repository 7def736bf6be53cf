use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use resumo_engine::UploadSettings;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

pub const CONFIG_ENV_VAR: &str = "RESUMO_CONFIG";
pub const SERVER_ENV_VAR: &str = "RESUMO_SERVER";
const DEFAULT_CONFIG_FILE: &str = "resumo.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid server url {url:?}: {source}")]
    ServerUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            download_dir: PathBuf::from("downloads"),
            connect_timeout_secs: 10,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Reads the config file named by `RESUMO_CONFIG` (or `resumo.ron`) and
    /// applies `RESUMO_SERVER`. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::from_file(&path)?;
        if let Ok(server) = std::env::var(SERVER_ENV_VAR) {
            config.server_url = server;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn upload_settings(&self) -> Result<UploadSettings, ConfigError> {
        let base_url = Url::parse(&self.server_url).map_err(|source| ConfigError::ServerUrl {
            url: self.server_url.clone(),
            source,
        })?;
        let mut settings = UploadSettings::new(base_url);
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        Ok(settings)
    }
}
