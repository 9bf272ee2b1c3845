//! Inventory Endpoint Client
//!
//! Issues a single GET against the Polly admin API and turns the JSON array
//! it returns into [`VolumeRecord`]s, preserving response order.
//!
//! Besides the listing, the admin API serves two read paths next to it:
//! `{endpoint}/{volumeID}` inspects one volume and a sibling `volumesall`
//! lists volumes across every service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use super::error::{InventoryError, InventoryResult};
use super::record::VolumeRecord;

/// Default inventory endpoint exposed by the Polly admin server
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/admin/volumes";

/// Last path segment of the cross-service listing
const ALL_VOLUMES_SEGMENT: &str = "volumesall";

/// Anything that can produce the current volume inventory
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Human-readable description of where records come from
    fn describe(&self) -> String;

    /// Retrieve the inventory, in the order the source reports it
    async fn fetch(&self) -> InventoryResult<Vec<VolumeRecord>>;
}

/// Configuration for the inventory client
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Full URL of the volumes listing
    pub endpoint: String,
    /// Request timeout in milliseconds; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl InventoryConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the inventory endpoint
pub struct InventoryFetcher {
    client: Client,
    config: InventoryConfig,
}

impl InventoryFetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: InventoryConfig) -> InventoryResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Fetch and parse the volume listing.
    ///
    /// No headers beyond reqwest's defaults are sent and nothing is retried.
    pub async fn fetch_volumes(&self) -> InventoryResult<Vec<VolumeRecord>> {
        let body = self.get(&self.config.endpoint).await?;
        let records = parse_inventory(&body)?;

        tracing::debug!(
            endpoint = %self.config.endpoint,
            records = records.len(),
            "Volume inventory received"
        );

        Ok(records)
    }

    /// Fetch the cross-service listing (`volumesall`).
    pub async fn fetch_all(&self) -> InventoryResult<Vec<VolumeRecord>> {
        let url = self.all_volumes_url()?;
        let body = self.get(url.as_str()).await?;
        let records = parse_inventory(&body)?;

        tracing::debug!(endpoint = %url, records = records.len(), "All volumes received");
        Ok(records)
    }

    /// Inspect a single volume by id. An unknown id surfaces as the
    /// server's status, usually `InventoryError::Status { status: 404 }`.
    pub async fn fetch_volume(&self, volume_id: &str) -> InventoryResult<VolumeRecord> {
        let url = self.volume_url(volume_id)?;
        let body = self.get(url.as_str()).await?;
        parse_volume(&body)
    }

    /// `{endpoint}/{volume_id}`, with the id encoded as one path segment
    pub fn volume_url(&self, volume_id: &str) -> InventoryResult<Url> {
        let mut url = self.endpoint_url()?;
        url.path_segments_mut()
            .map_err(|_| self.invalid_endpoint())?
            .pop_if_empty()
            .push(volume_id);
        Ok(url)
    }

    /// The listing endpoint with its last segment swapped for `volumesall`
    pub fn all_volumes_url(&self) -> InventoryResult<Url> {
        let mut url = self.endpoint_url()?;
        url.path_segments_mut()
            .map_err(|_| self.invalid_endpoint())?
            .pop_if_empty()
            .pop()
            .push(ALL_VOLUMES_SEGMENT);
        Ok(url)
    }

    fn endpoint_url(&self) -> InventoryResult<Url> {
        Url::parse(&self.config.endpoint).map_err(|_| self.invalid_endpoint())
    }

    fn invalid_endpoint(&self) -> InventoryError {
        InventoryError::InvalidEndpoint {
            endpoint: self.config.endpoint.clone(),
        }
    }

    async fn get(&self, url: &str) -> InventoryResult<Vec<u8>> {
        tracing::debug!(endpoint = %url, "Fetching volume inventory");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl InventorySource for InventoryFetcher {
    fn describe(&self) -> String {
        self.config.endpoint.clone()
    }

    async fn fetch(&self) -> InventoryResult<Vec<VolumeRecord>> {
        self.fetch_volumes().await
    }
}

/// Parse a response body into records, keeping array order.
pub fn parse_inventory(body: &[u8]) -> InventoryResult<Vec<VolumeRecord>> {
    let value: Value = serde_json::from_slice(body)?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(VolumeRecord::from_value).collect()),
        other => Err(InventoryError::NotAnArray {
            found: json_type_name(&other),
        }),
    }
}

/// Parse a single-volume response. Unlike list elements, a lookup that
/// returns a non-object is an error rather than an empty record.
pub fn parse_volume(body: &[u8]) -> InventoryResult<VolumeRecord> {
    let value: Value = serde_json::from_slice(body)?;

    match value {
        Value::Object(_) => Ok(VolumeRecord::from_value(value)),
        other => Err(InventoryError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
