//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::api::ApiConfig as ServerConfig;
use crate::storage::{StoreConfig, DEFAULT_TIME_FORMAT};
use crate::tracker::DEFAULT_LEADERBOARD_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Local storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("hitdash").to_string_lossy().to_string())
        .unwrap_or_else(|| "./hitdash_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Dashboard presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: default_leaderboard_size(),
            time_format: default_time_format(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file, or fall back to the default locations
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hitdash").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Store settings derived from this configuration
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(expand_home(&self.storage.data_dir))
            .time_format(&self.dashboard.time_format)
    }

    /// Server settings derived from this configuration
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            leaderboard_size: self.dashboard.leaderboard_size,
            ..ServerConfig::new(&self.api.host, self.api.port)
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = lookup("HITDASH_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Dashboard overrides
        if let Some(size) = lookup("HITDASH_LEADERBOARD_SIZE").and_then(|s| s.parse().ok()) {
            self.dashboard.leaderboard_size = size;
        }

        // API overrides
        if let Some(host) = lookup("HITDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("HITDASH_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }

        // Logging overrides
        if let Some(level) = lookup("HITDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HITDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Hitdash Configuration
#
# Environment variables override these settings:
# - HITDASH_DATA_DIR
# - HITDASH_LEADERBOARD_SIZE
# - HITDASH_API_HOST
# - HITDASH_API_PORT
# - HITDASH_LOG_LEVEL
# - HITDASH_LOG_FORMAT

[storage]
# Directory holding hits.json
data_dir = "~/.local/share/hitdash"

[dashboard]
# Number of URLs shown on the leaderboard
leaderboard_size = 5

# strftime format for recorded timestamps.
# Per-day counts group on the text before the first comma.
time_format = "%-m/%-d/%Y, %-I:%M:%S %p"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8086

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dashboard.leaderboard_size, 5);
        assert_eq!(config.dashboard.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config(), Path::new("config.toml")).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/hitdash");
        assert_eq!(config.dashboard.leaderboard_size, 5);
        assert_eq!(config.dashboard.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            "[dashboard]\nleaderboard_size = 3\n",
            Path::new("config.toml"),
        )
        .unwrap();
        assert_eq!(config.dashboard.leaderboard_size, 3);
        assert_eq!(config.dashboard.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(config.api.port, 8086);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[dashboard\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/hitdash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("HITDASH_DATA_DIR", "/tmp/hits"),
            ("HITDASH_API_PORT", "9000"),
            ("HITDASH_LEADERBOARD_SIZE", "not a number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/hits");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.dashboard.leaderboard_size, 5);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/lib/hitdash"), PathBuf::from("/var/lib/hitdash"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/hits"), home.join("hits"));
        }
    }

    #[test]
    fn test_derived_configs() {
        let mut config = Config::default();
        config.storage.data_dir = "/tmp/hits".to_string();
        config.dashboard.leaderboard_size = 2;

        let store = config.store_config();
        assert_eq!(store.hits_path(), PathBuf::from("/tmp/hits/hits.json"));

        let server = config.server_config();
        assert_eq!(server.addr(), "127.0.0.1:8086");
        assert_eq!(server.leaderboard_size, 2);
    }
}
