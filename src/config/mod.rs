//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/travel-guide/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Place catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Media URL settings
    #[serde(default)]
    pub media: MediaConfig,

    /// Access control for search endpoints
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Place catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON catalog file; empty catalog when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Media URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Public origin for media URLs (e.g. "https://travel.example").
    /// When unset, the origin is taken from each request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    /// URL prefix under which media files are served
    #[serde(default = "default_media_prefix")]
    pub prefix: String,
}

/// Access control for search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require an authenticated caller for nearest-first search
    #[serde(default = "default_nearby_require_auth")]
    pub nearby_require_auth: bool,

    /// Require an authenticated caller for top-rated search
    #[serde(default = "default_top_rated_require_auth")]
    pub top_rated_require_auth: bool,

    /// Accepted bearer tokens, mapped to the user they identify
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_media_prefix() -> String {
    DEFAULT_MEDIA_PREFIX.to_string()
}
fn default_nearby_require_auth() -> bool {
    DEFAULT_NEARBY_REQUIRE_AUTH
}
fn default_top_rated_require_auth() -> bool {
    DEFAULT_TOP_RATED_REQUIRE_AUTH
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            public_base_url: None,
            prefix: default_media_prefix(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            nearby_require_auth: default_nearby_require_auth(),
            top_rated_require_auth: default_top_rated_require_auth(),
            tokens: HashMap::new(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid boolean value for {}: {}", key, value)))
}

/// Treat an empty string as "unset"
fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
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
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
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
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["catalog", "path"] => Some(self.catalog.path.clone().unwrap_or_default()),

            ["media", "public_base_url"] => {
                Some(self.media.public_base_url.clone().unwrap_or_default())
            }
            ["media", "prefix"] => Some(self.media.prefix.clone()),

            ["auth", "nearby_require_auth"] => Some(self.auth.nearby_require_auth.to_string()),
            ["auth", "top_rated_require_auth"] => {
                Some(self.auth.top_rated_require_auth.to_string())
            }

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
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["catalog", "path"] => {
                self.catalog.path = optional(value);
            }

            ["media", "public_base_url"] => {
                self.media.public_base_url = optional(value);
            }
            ["media", "prefix"] => {
                self.media.prefix = value.to_string();
            }

            ["auth", "nearby_require_auth"] => {
                self.auth.nearby_require_auth = parse_bool(key, value)?;
            }
            ["auth", "top_rated_require_auth"] => {
                self.auth.top_rated_require_auth = parse_bool(key, value)?;
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
            "server.host",
            "server.port",
            "catalog.path",
            "media.public_base_url",
            "media.prefix",
            "auth.nearby_require_auth",
            "auth.top_rated_require_auth",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
