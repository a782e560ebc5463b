use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable consulted for the weather-service API key.
pub const API_KEY_ENV_VAR: &str = "OPEN_WEATHER_API_KEY";

const DEFAULT_CACHE_FILE: &str = "countries.json";
const DEFAULT_EXPORT_FILE: &str = "export.csv";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// cache_file = "countries.json"
/// export_file = "export.csv"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather-service API key. The `OPEN_WEATHER_API_KEY` environment
    /// variable takes precedence over this value.
    pub api_key: Option<String>,

    /// Where the country cache snapshot lives; defaults to `countries.json`
    /// in the working directory.
    pub cache_file: Option<PathBuf>,

    /// Where weather results are exported; defaults to `export.csv` in the
    /// working directory.
    pub export_file: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|err| Error::persistence("read config file", &path, err))?;

        let cfg: Config = toml::from_str(&contents)
            .map_err(|err| Error::persistence("parse config file", &path, err))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| Error::persistence("create config directory", parent, err))?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|err| Error::persistence("serialize config for", &path, err))?;

        fs::write(&path, toml).map_err(|err| Error::persistence("write config file", &path, err))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-aggregator", "aggregator").ok_or_else(|| {
            Error::InvalidArgument("Could not determine platform config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn cache_file(&self) -> PathBuf {
        self.cache_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE))
    }

    pub fn export_file(&self) -> PathBuf {
        self.export_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE))
    }

    /// API key for the weather service, environment first, config second.
    ///
    /// A missing key is not an error here; the weather resolver rejects it
    /// when it is actually needed.
    pub fn resolve_api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }
}
