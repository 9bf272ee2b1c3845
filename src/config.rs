//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dom::VOLUME_LIST_ID;
use crate::inventory::{InventoryConfig, DEFAULT_ENDPOINT};
use crate::pipeline::{FailurePolicy, PipelineOptions, RefreshPolicy};
use crate::render::{RenderMode, DEFAULT_PAGE_TITLE, DEFAULT_VOLUME_IMAGE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inventory: InventorySettings,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inventory endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InventorySettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: None,
        }
    }
}

impl InventorySettings {
    pub fn client_config(&self) -> InventoryConfig {
        InventoryConfig {
            endpoint: self.endpoint.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Volume card rendering
#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub mode: RenderMode,

    #[serde(default = "default_image")]
    pub volume_image: String,
}

fn default_image() -> String {
    DEFAULT_VOLUME_IMAGE.to_string()
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            volume_image: default_image(),
        }
    }
}

/// Page and pipeline behavior
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_container_id")]
    pub container_id: String,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub refresh_policy: RefreshPolicy,

    /// Interval between runs of the CLI `watch` command
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

fn default_container_id() -> String {
    VOLUME_LIST_ID.to_string()
}

fn default_watch_interval() -> u64 {
    30
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            failure_policy: FailurePolicy::default(),
            refresh_policy: RefreshPolicy::default(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

impl DashboardSettings {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            failure: self.failure_policy,
            refresh: self.refresh_policy,
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Page heading and browser title
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            title: default_title(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("polly-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/polly-dashboard/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("POLLY_DASHBOARD_ENDPOINT") {
            self.inventory.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("POLLY_DASHBOARD_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.inventory.request_timeout_ms = Some(ms);
            }
        }

        if let Ok(mode) = std::env::var("POLLY_DASHBOARD_RENDER_MODE") {
            match mode.parse() {
                Ok(mode) => self.render.mode = mode,
                Err(e) => tracing::warn!("Ignoring POLLY_DASHBOARD_RENDER_MODE: {}", e),
            }
        }

        if let Ok(policy) = std::env::var("POLLY_DASHBOARD_FAILURE_POLICY") {
            match policy.parse() {
                Ok(policy) => self.dashboard.failure_policy = policy,
                Err(e) => tracing::warn!("Ignoring POLLY_DASHBOARD_FAILURE_POLICY: {}", e),
            }
        }
        if let Ok(policy) = std::env::var("POLLY_DASHBOARD_REFRESH_POLICY") {
            match policy.parse() {
                Ok(policy) => self.dashboard.refresh_policy = policy,
                Err(e) => tracing::warn!("Ignoring POLLY_DASHBOARD_REFRESH_POLICY: {}", e),
            }
        }

        if let Ok(host) = std::env::var("POLLY_DASHBOARD_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("POLLY_DASHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(title) = std::env::var("POLLY_DASHBOARD_TITLE") {
            self.api.title = title;
        }

        if let Ok(level) = std::env::var("POLLY_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("POLLY_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
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
    r#"# Polly Dashboard Configuration
#
# Environment variables override these settings:
# - POLLY_DASHBOARD_ENDPOINT
# - POLLY_DASHBOARD_TIMEOUT_MS
# - POLLY_DASHBOARD_RENDER_MODE
# - POLLY_DASHBOARD_FAILURE_POLICY
# - POLLY_DASHBOARD_REFRESH_POLICY
# - POLLY_DASHBOARD_HOST
# - POLLY_DASHBOARD_PORT
# - POLLY_DASHBOARD_TITLE
# - POLLY_DASHBOARD_LOG_LEVEL
# - POLLY_DASHBOARD_LOG_FORMAT

[inventory]
# Volume listing of the Polly admin API
endpoint = "http://127.0.0.1:8080/admin/volumes"

# Request timeout in milliseconds (unset: wait indefinitely)
# request_timeout_ms = 5000

[render]
# escaped: HTML-escape field values
# verbatim: embed field values unmodified (legacy; allows markup injection)
mode = "escaped"

# Image shown on every volume card
volume_image = "../images/volume.png"

[dashboard]
# Id of the element receiving volume cards
container_id = "volumeList"

# surface: show an empty-state message when the inventory cannot be loaded
# silent: render nothing
failure_policy = "surface"

# append: repeated runs add to existing cards
# replace: repeated runs replace existing cards
refresh_policy = "append"

# Seconds between runs of `polly-dashboard-cli watch`
watch_interval_secs = 30

[api]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8084

# Page heading and browser title
title = "Polly Storage Dashboard"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
