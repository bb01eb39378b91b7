//! # Order Error Types
//!
//! Typed error handling for the crumbcart order engine.
//! All order operations return `Result<T, OrderError>`.

use crate::order::{OrderStatus, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Core error type for all order operations
#[derive(Debug, Error)]
pub enum OrderError {
    /// Product not found in catalog
    #[error("Product not found: {product_code}")]
    ProductNotFound { product_code: String },

    /// Add-on not found in catalog
    #[error("Add-on not found: {addon_code}")]
    AddOnNotFound { addon_code: String },

    /// Servings outside the product's allowed range
    #[error("Servings out of range: {servings} not in [{min}, {max}]")]
    ServingsOutOfRange {
        servings: u32,
        min: u32,
        max: u32,
    },

    /// Draft-level validation failure (missing pickup time, missing
    /// delivery address, category rule breach, empty cancel reason)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested fulfillment instant is earlier than the lead time allows
    #[error("Lead time violation: requested {requested}, earliest allowed {required}")]
    LeadTimeViolation {
        required: DateTime<Utc>,
        requested: DateTime<Utc>,
    },

    /// Illegal order status change
    #[error("Invalid transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Illegal payment status change (e.g. refund before any payment)
    #[error("Invalid payment transition: {from:?} -> {to:?}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Deposit payment below the required amount
    #[error("Insufficient deposit: offered {offered}, required {required}")]
    InsufficientDeposit {
        required: Decimal,
        offered: Decimal,
    },

    /// Order not found in the repository
    #[error("Order not found: {order_number}")]
    OrderNotFound { order_number: String },

    /// Concurrent writer won; the read was stale
    #[error("Version conflict on order {order_number}")]
    VersionConflict { order_number: String },

    /// Persistence failure (opaque cause)
    #[error("Repository error: {0}")]
    Repository(String),
}

impl OrderError {
    /// Returns true if the caller may retry the same operation as-is
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::Repository(_) | OrderError::VersionConflict { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::ProductNotFound { .. } => 404,
            OrderError::AddOnNotFound { .. } => 404,
            OrderError::ServingsOutOfRange { .. } => 400,
            OrderError::Validation(_) => 400,
            OrderError::LeadTimeViolation { .. } => 422,
            OrderError::InvalidTransition { .. } => 409,
            OrderError::InvalidPaymentTransition { .. } => 409,
            OrderError::InsufficientDeposit { .. } => 402,
            OrderError::OrderNotFound { .. } => 404,
            OrderError::VersionConflict { .. } => 409,
            OrderError::Repository(_) => 503,
        }
    }
}

/// Result type alias for order operations
pub type OrderResult<T> = Result<T, OrderError>;
