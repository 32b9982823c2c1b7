use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::codec::DecodeMode;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// `tracing_subscriber` env filter directive.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub decode_mode: DecodeMode,
    /// Output path used when a command is not given `--output`.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_log_filter() -> String {
    "robj=info".into()
}

fn default_output() -> PathBuf {
    PathBuf::from("scene.robj")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
}

type ConfigResult<T> = Result<T, ConfigError>;

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            decode_mode: DecodeMode::default(),
            output: default_output(),
        }
    }
}
