//! Server configuration loaded from environment variables.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory for the JSON file store. In-memory storage when unset.
    pub data_dir: Option<PathBuf>,
    /// `max_new` used by the study queue when the request omits it.
    pub default_max_new_cards: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: None,
            default_max_new_cards: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = get("HOST").unwrap_or(defaults.host);

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue("PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };

        let data_dir = get("DATA_DIR").map(PathBuf::from);

        let default_max_new_cards = match get("DEFAULT_MAX_NEW_CARDS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("DEFAULT_MAX_NEW_CARDS".to_string(), e.to_string())
            })?,
            None => defaults.default_max_new_cards,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            default_max_new_cards,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
