//! Data Transfer Objects
//!
//! Response types for the dashboard JSON endpoints.

use serde::Serialize;

use crate::inventory::VolumeRecord;

/// Volume listing passed through from the inventory endpoint
#[derive(Debug, Serialize)]
pub struct VolumeListResponse {
    /// Number of volumes returned
    pub count: usize,
    /// Records in response order
    pub volumes: Vec<VolumeRecord>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Where volume records are fetched from
    pub inventory: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
