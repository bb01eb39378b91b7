//! # In-Memory Order Repository
//!
//! A `tokio::sync::RwLock`-backed order store. Writes bump the stored
//! order's version counter and reject stale `expected_version`s, so two
//! concurrent transition attempts cannot both succeed against the same
//! read. Orders are never removed; cancellation is a status change.

use async_trait::async_trait;
use cake_core::error::OrderResult;
use cake_core::order::{CustomOrder, OrderStatus};
use cake_core::repository::{OrderRepository, OrderStatistics};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process order store with versioned compare-and-swap writes
#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<String, CustomOrder>>,
}

impl MemoryOrderRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders held (for diagnostics)
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn insert(&self, order: &CustomOrder) -> OrderResult<bool> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.order_number) {
            return Ok(false);
        }
        let mut stored = order.clone();
        stored.version = 0;
        orders.insert(stored.order_number.clone(), stored);
        debug!(order_number = %order.order_number, "order inserted");
        Ok(true)
    }

    async fn find_by_order_number(&self, order_number: &str) -> OrderResult<Option<CustomOrder>> {
        Ok(self.orders.read().await.get(order_number).cloned())
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> OrderResult<Vec<CustomOrder>> {
        let orders = self.orders.read().await;
        let mut found: Vec<CustomOrder> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        found.sort_by_key(|o| o.created_at);
        Ok(found)
    }

    async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<CustomOrder>> {
        let orders = self.orders.read().await;
        let mut found: Vec<CustomOrder> = orders
            .values()
            .filter(|o| o.order_status == status)
            .cloned()
            .collect();
        found.sort_by_key(|o| o.created_at);
        Ok(found)
    }

    async fn update(&self, order: &CustomOrder, expected_version: u64) -> OrderResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.order_number) {
            Some(stored) if stored.version == expected_version => {
                let mut updated = order.clone();
                updated.version = expected_version + 1;
                *stored = updated;
                Ok(true)
            }
            Some(stored) => {
                debug!(
                    order_number = %order.order_number,
                    expected = expected_version,
                    actual = stored.version,
                    "stale write rejected"
                );
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn statistics(&self) -> OrderResult<OrderStatistics> {
        let orders = self.orders.read().await;
        let mut stats = OrderStatistics::default();
        for order in orders.values() {
            stats.total_orders += 1;
            match order.order_status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Confirmed => stats.confirmed_orders += 1,
                _ => {}
            }
            if order.order_status != OrderStatus::Cancelled {
                stats.total_revenue += order.pricing.total_amount;
            }
        }
        Ok(stats)
    }
}
