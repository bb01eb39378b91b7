//! # Order Repository Trait
//!
//! Persistence seam for the order engine. The engine talks to storage only
//! through this trait; schema and durability are the implementation's
//! concern. `cake-store` ships the in-memory implementation.

use crate::error::OrderResult;
use crate::order::{CustomOrder, OrderStatus};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Aggregate counters over the order book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatistics {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub confirmed_orders: u64,
    /// Sum of `total_amount` over non-cancelled orders
    pub total_revenue: Decimal,
}

/// Storage collaborator for persisted orders.
///
/// All writes are compare-and-swapped on the order's `version` counter so
/// two concurrent transition attempts cannot both succeed against a stale
/// read. Orders are never hard-deleted; cancellation is a status.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a freshly submitted order.
    ///
    /// Returns false if the order number already exists (nothing is
    /// overwritten).
    async fn insert(&self, order: &CustomOrder) -> OrderResult<bool>;

    /// Fetch one order by its number
    async fn find_by_order_number(&self, order_number: &str) -> OrderResult<Option<CustomOrder>>;

    /// All orders placed by a customer, oldest first
    async fn find_by_customer_id(&self, customer_id: &str) -> OrderResult<Vec<CustomOrder>>;

    /// All orders currently in a given status, oldest first
    async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<CustomOrder>>;

    /// Write back a mutated order if `expected_version` still matches the
    /// stored version. Returns false on a stale version; the caller re-reads
    /// and retries or surfaces the conflict.
    async fn update(&self, order: &CustomOrder, expected_version: u64) -> OrderResult<bool>;

    /// Aggregate counters for reporting
    async fn statistics(&self) -> OrderResult<OrderStatistics>;
}

/// Type alias for a shared repository handle (dynamic dispatch)
pub type BoxedOrderRepository = Arc<dyn OrderRepository>;
