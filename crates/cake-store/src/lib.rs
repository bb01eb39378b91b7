//! # cake-store
//!
//! Order repository implementations for the crumbcart bakery service.
//!
//! Currently ships `MemoryOrderRepository`, an in-process store with the
//! same optimistic-concurrency contract a durable backend would honor:
//! every write is compare-and-swapped on the order's version counter.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cake_store::MemoryOrderRepository;
//! use std::sync::Arc;
//!
//! let repository = Arc::new(MemoryOrderRepository::new());
//! let service = OrderService::new(products, addons, repository);
//! ```

pub mod memory;

// Re-exports
pub use memory::MemoryOrderRepository;
