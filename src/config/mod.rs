#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HubError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "faculty-hub.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Effective client settings: defaults, then the TOML file, then CLI overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub session_dir: String,
    pub log_level: Option<String>,
    pub log_json: bool,
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub session_dir: Option<String>,
    pub log_json: bool,
}

pub fn default_session_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Path::new(&home)
            .join(".faculty-hub")
            .to_string_lossy()
            .into_owned(),
        _ => ".faculty-hub".to_string(),
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            session_dir: default_session_dir(),
            log_level: None,
            log_json: false,
        }
    }
}

impl ClientConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: file
                .base_url()
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            timeout_seconds: file.timeout_seconds().unwrap_or(defaults.timeout_seconds),
            session_dir: file
                .session_dir()
                .map(str::to_string)
                .unwrap_or(defaults.session_dir),
            log_level: file.log_level().map(str::to_string),
            log_json: file.log_json(),
        }
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(url) = &overrides.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(timeout) = overrides.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(dir) = &overrides.session_dir {
            self.session_dir = dir.clone();
        }
        self.log_json |= overrides.log_json;
        self
    }

    /// 載入設定：明確指定的檔案必須存在，預設檔案則可有可無
    pub fn load(explicit_path: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        let file = match explicit_path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(HubError::ConfigError {
                        message: format!("Config file '{}' does not exist", path),
                    });
                }
                tracing::debug!("Loading configuration from {}", path);
                TomlConfig::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        Ok(Self::from_toml(&file).with_overrides(overrides))
    }
}

impl ConfigProvider for ClientConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn session_dir(&self) -> &str {
        &self.session_dir
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_base_url)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validation::validate_path("session.dir", &self.session_dir)?;

        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(HubError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }
}
