//! # Polly Dashboard
//!
//! Storage inventory dashboard for the Polly volume scheduler: usage charts
//! and one detail card per volume, rendered from the admin API's volume
//! listing.
//!
//! ## Modules
//!
//! - [`inventory`]: Fetching and parsing the volume listing
//! - [`render`]: Volume cards and the dashboard page
//! - [`dom`]: Containers that collect rendered cards
//! - [`pipeline`]: Fetch, render and append, in response order
//! - [`charts`]: Static usage chart configuration
//! - [`api`]: Dashboard HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polly_dashboard::{Config, Document, InventoryPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = InventoryPipeline::from_config(&Config::default())?;
//!
//!     let mut doc = Document::dashboard();
//!     let report = pipeline.run(&mut doc).await?;
//!
//!     println!("Rendered {} volumes", report.appended);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dom;
pub mod inventory;
pub mod logging;
pub mod pipeline;
pub mod render;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use charts::{ChartPanel, ChartWidget, GREENS};

pub use config::{Config, ConfigError, LoggingConfig};

pub use dom::{Container, Document, DomAppender, DomError, VOLUME_LIST_ID};

pub use inventory::{
    ErrorKind, InventoryConfig, InventoryError, InventoryFetcher, InventoryResult,
    InventorySource, VolumeRecord, DEFAULT_ENDPOINT,
};

pub use pipeline::{
    FailurePolicy, InventoryPipeline, PipelineError, PipelineOptions, PipelineReport,
    RefreshPolicy,
};

pub use render::{DashboardPage, Fragment, RecordRenderer, RenderMode};
