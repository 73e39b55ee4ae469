//! Error types for order intake, storage and ranking

use thiserror::Error;

use crate::order::{BuyerId, OrderId};

/// Result type for order operations
pub type OrderResult<T> = Result<T, OrderError>;

/// Order management error types
#[derive(Debug, Error)]
pub enum OrderError {
    /// Requested sort mode is not one of the recognized modes
    #[error("Invalid sort option: {0}")]
    InvalidMode(String),

    /// Order validation failed
    #[error("Order validation failed: {0}")]
    ValidationError(String),

    /// A delicacy, container or status label did not match any variant
    #[error("Invalid {field} value: {value}")]
    InvalidEnumValue {
        /// Form field the label came from
        field: &'static str,
        /// Raw value as submitted
        value: String,
    },

    /// Pickup date is not a `YYYY-MM-DD` calendar date
    #[error("Invalid pickup date '{value}': {source}")]
    InvalidDate {
        /// Raw value as submitted
        value: String,
        /// Underlying parse failure
        #[source]
        source: chrono::ParseError,
    },

    /// Quantity is not a positive integer
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Buyer not found
    #[error("Buyer not found: {0}")]
    BuyerNotFound(BuyerId),

    /// Order is in invalid state for operation
    #[error("Order {order_id} in invalid state {current_state} for {operation}")]
    InvalidOrderState {
        /// Order ID
        order_id: OrderId,
        /// Current state
        current_state: String,
        /// Operation attempted
        operation: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl OrderError {
    /// Check if the error was caused by the caller's request rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OrderError::InvalidMode(_)
                | OrderError::ValidationError(_)
                | OrderError::InvalidEnumValue { .. }
                | OrderError::InvalidDate { .. }
                | OrderError::InvalidQuantity(_)
                | OrderError::InvalidOrderState { .. }
        )
    }

    /// Check if error is due to a missing order or buyer
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderError::OrderNotFound(_) | OrderError::BuyerNotFound(_)
        )
    }
}
