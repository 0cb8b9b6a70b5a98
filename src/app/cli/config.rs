//! TOML configuration file loading and settings resolution
//!
//! Values come from three layers: command line flags, the configuration file
//! and built-in defaults, in that order of precedence.

use super::args::{Args, CodecName};
use crate::core::logging::LogFormat;
use crate::producer::{BoundedQueue, DEFAULT_KEY};
use crate::store::{SequenceCodec, DEFAULT_SEPARATOR};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CAPACITY: i64 = 3;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("no data directory available, pass --store")]
    NoDataDir,
}

/// Contents of the configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub capacity: Option<i64>,
    pub store: Option<PathBuf>,
    pub key: Option<String>,
    pub codec: Option<CodecName>,
    pub separator: Option<char>,
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
    #[serde(alias = "log-format")]
    pub log_format: Option<String>,
    #[serde(alias = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration file
    ///
    /// An explicitly named file must exist. Without one the default location
    /// is tried and a missing default file yields an empty configuration.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        Self::parse(&contents, &path)
    }
}

/// `<config dir>/Eventcell/eventcell.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Eventcell").join("eventcell.toml"))
}

/// `<data dir>/eventcell/store.json`
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("eventcell").join("store.json"))
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store: PathBuf,
    pub key: String,
    pub capacity: usize,
    pub codec: SequenceCodec,
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self, ConfigError> {
        let capacity = args.capacity.or(file.capacity).unwrap_or(DEFAULT_CAPACITY);
        let capacity = BoundedQueue::<String>::try_from(capacity)
            .map_err(|e| ConfigError::InvalidValue {
                field: "capacity",
                message: e.to_string(),
            })?
            .capacity();

        let store = match args.store.clone().or(file.store) {
            Some(path) => path,
            None => default_store_path().ok_or(ConfigError::NoDataDir)?,
        };

        let key = args
            .key
            .clone()
            .or(file.key)
            .unwrap_or_else(|| DEFAULT_KEY.to_string());
        if key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "key",
                message: "must not be empty".to_string(),
            });
        }

        let separator = args.separator.or(file.separator);
        let codec = match args.codec.or(file.codec).unwrap_or(CodecName::Length) {
            CodecName::Length => {
                if separator.is_some() {
                    log::warn!("Separator is ignored by the length codec");
                }
                SequenceCodec::LengthPrefixed
            }
            CodecName::Separated => {
                SequenceCodec::Separated(separator.unwrap_or(DEFAULT_SEPARATOR))
            }
        };

        let log_format = match args.log_format.as_deref().or(file.log_format.as_deref()) {
            Some(name) => LogFormat::parse(name).ok_or_else(|| ConfigError::InvalidValue {
                field: "log_format",
                message: format!("unknown format '{}', expected text, ext or json", name),
            })?,
            None => LogFormat::default(),
        };

        // "none" and "-" disable file logging
        let log_file = args
            .log_file
            .clone()
            .or(file.log_file)
            .filter(|path| {
                let text = path.to_string_lossy();
                !(text.eq_ignore_ascii_case("none") || text == "-")
            });

        Ok(Self {
            store,
            key,
            capacity,
            codec,
            log_level: args
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
            log_file,
            color: args.color_override(),
        })
    }
}
