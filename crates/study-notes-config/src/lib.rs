use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from `~/.config/study-notes/config.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Directory holding one TOML file per post
    pub posts_path: PathBuf,
    /// Category used by `new` when none is given on the command line
    #[serde(default)]
    pub default_category: Option<String>,
}

impl Config {
    pub fn new(posts_path: impl Into<PathBuf>) -> Self {
        Self {
            posts_path: posts_path.into(),
            default_category: None,
        }
    }

    /// A missing file is not an error; it means "not configured"
    pub fn load_from_path(config_path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(Self {
            posts_path: Self::expand_path(&config.posts_path).unwrap_or(config.posts_path),
            ..config
        }))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/study-notes");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables; `None` if a variable is unset
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
