//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/repeaterbook/config.toml

pub mod defaults;

use crate::api::ApiSettings;
use crate::error::{Error, Result};
use crate::geo::DistanceUnit;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// RepeaterBook connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Default values for searches
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// RepeaterBook connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Site root the export endpoints live under
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application name sent in the User-Agent
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Contact address sent in the User-Agent
    #[serde(default = "default_app_email")]
    pub app_email: String,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding `.repeaterbook_cache/` and the record store
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Seconds a cached response stays fresh
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

/// Default values for searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Default distance unit
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Default search radius
    #[serde(default = "default_radius")]
    pub radius: f64,
}

// Default value functions for serde
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
fn default_app_email() -> String {
    DEFAULT_APP_EMAIL.to_string()
}
fn default_working_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKING_DIR)
}
fn default_max_age() -> u64 {
    DEFAULT_MAX_AGE_SECS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}
fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_name: default_app_name(),
            app_email: default_app_email(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            max_age_secs: default_max_age(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            unit: default_unit(),
            radius: default_radius(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "app_name"] => Some(self.api.app_name.clone()),
            ["api", "app_email"] => Some(self.api.app_email.clone()),

            ["cache", "working_dir"] => Some(self.cache.working_dir.display().to_string()),
            ["cache", "max_age_secs"] => Some(self.cache.max_age_secs.to_string()),

            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "unit"] => Some(self.defaults.unit.clone()),
            ["defaults", "radius"] => Some(self.defaults.radius.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                reqwest::Url::parse(value).map_err(|e| {
                    Error::Config(format!("Invalid base URL {}: {}", value, e))
                })?;
                self.api.base_url = value.to_string();
            }
            ["api", "app_name"] => {
                self.api.app_name = value.to_string();
            }
            ["api", "app_email"] => {
                self.api.app_email = value.to_string();
            }

            ["cache", "working_dir"] => {
                self.cache.working_dir = PathBuf::from(value);
            }
            ["cache", "max_age_secs"] => {
                self.cache.max_age_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max age value: {}", value))
                })?;
            }

            ["defaults", "format"] => {
                if crate::format::get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown format: {}", value)));
                }
                self.defaults.format = value.to_lowercase();
            }
            ["defaults", "unit"] => {
                value.parse::<DistanceUnit>().map_err(Error::Config)?;
                self.defaults.unit = value.to_string();
            }
            ["defaults", "radius"] => {
                let radius: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(Error::Config(format!("Radius must be positive: {}", value)));
                }
                self.defaults.radius = radius;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.app_name",
            "api.app_email",
            "cache.working_dir",
            "cache.max_age_secs",
            "defaults.format",
            "defaults.unit",
            "defaults.radius",
        ]
    }

    /// `User-Agent` header value: `"<app name> <<app email>>"`
    pub fn user_agent(&self) -> String {
        format!("{} <{}>", self.api.app_name, self.api.app_email)
    }

    /// Default distance unit, falling back to kilometers if unparsable
    pub fn default_unit(&self) -> DistanceUnit {
        self.defaults.unit.parse().unwrap_or_default()
    }

    /// Settings for constructing a [`crate::RepeaterBookApi`]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api.base_url.clone(),
            app_name: self.api.app_name.clone(),
            app_email: self.api.app_email.clone(),
            working_dir: self.cache.working_dir.clone(),
            max_cache_age: Duration::from_secs(self.cache.max_age_secs),
        }
    }
}
