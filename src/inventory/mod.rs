//! Volume Inventory
//!
//! Retrieval of the volume listing from the Polly admin API.
//!
//! ## Data Flow
//!
//! 1. [`InventoryFetcher`] issues one GET to the configured endpoint
//! 2. The body is parsed as a JSON array, element order preserved
//! 3. Each element becomes a [`VolumeRecord`]; malformed elements are tolerated

mod client;
mod error;
mod record;

pub use client::{
    parse_inventory, parse_volume, InventoryConfig, InventoryFetcher, InventorySource, DEFAULT_ENDPOINT,
};
pub use error::{ErrorKind, InventoryError, InventoryResult};
pub use record::{field_text, VolumeRecord, MISSING_FIELD};
