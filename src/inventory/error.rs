//! Inventory error types

use thiserror::Error;

/// Errors that can occur while retrieving the volume inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The request could not be completed (connect, DNS, reset, timeout)
    #[error("Inventory request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Inventory endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The body is not valid JSON
    #[error("Inventory response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body is JSON but not an array of records
    #[error("Inventory response is not a JSON array (got {found})")]
    NotAnArray { found: &'static str },

    /// A single-volume lookup answered with something other than an object
    #[error("Volume response is not a JSON object (got {found})")]
    NotAnObject { found: &'static str },

    /// The configured endpoint cannot be extended into a related admin URL
    #[error("Invalid inventory endpoint: {endpoint}")]
    InvalidEndpoint { endpoint: String },
}

/// Coarse classification used when presenting a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::Network(_)
            | InventoryError::Status { .. }
            | InventoryError::InvalidEndpoint { .. } => ErrorKind::Network,
            InventoryError::Parse(_)
            | InventoryError::NotAnArray { .. }
            | InventoryError::NotAnObject { .. } => ErrorKind::Parse,
        }
    }
}

/// Result type alias for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InventoryError::Status { status: 500 };
        assert_eq!(err.to_string(), "Inventory endpoint returned HTTP 500");

        let err = InventoryError::NotAnArray { found: "object" };
        assert_eq!(
            err.to_string(),
            "Inventory response is not a JSON array (got object)"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(InventoryError::Status { status: 404 }.kind(), ErrorKind::Network);
        assert_eq!(InventoryError::NotAnArray { found: "string" }.kind(), ErrorKind::Parse);
        assert_eq!(InventoryError::NotAnObject { found: "array" }.kind(), ErrorKind::Parse);

        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: InventoryError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
