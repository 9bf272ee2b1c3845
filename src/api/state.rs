//! Application State
//!
//! Shared state accessible by all dashboard handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::charts::ChartPanel;
use crate::config::Config;
use crate::pipeline::InventoryPipeline;
use crate::render::DEFAULT_PAGE_TITLE;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Fetch-render pipeline run once per page load
    pub pipeline: Arc<InventoryPipeline>,
    /// Static usage charts
    pub charts: Arc<ChartPanel>,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: InventoryPipeline, config: ApiConfig) -> Self {
        Self::with_charts(pipeline, ChartPanel::default(), config)
    }

    pub fn with_charts(pipeline: InventoryPipeline, charts: ChartPanel, config: ApiConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            charts: Arc::new(charts),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Page heading and title
    pub title: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8084,
            title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.api.title.clone(),
            ..Self::new(config.api.host.clone(), config.api.port)
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
