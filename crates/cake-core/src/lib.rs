//! # cake-core
//!
//! Order pricing and lifecycle engine for the crumbcart bakery service.
//!
//! This crate provides:
//! - `pricing::calculate` and `PriceBreakdown` for the price breakdown
//! - `leadtime` for earliest-fulfillment computation and validation
//! - `OrderDraft` for the in-progress order being assembled
//! - `CustomOrder` with a guarded status/payment state machine
//! - `OrderService` orchestrating drafts, submission, and transitions
//! - `OrderRepository` as the persistence seam
//! - `OrderError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cake_core::{OrderService, FulfillmentType};
//!
//! let service = OrderService::new(products, addons, repository);
//!
//! // Assemble a draft
//! let mut draft = service.start_draft("cust-42", "choc-fudge-round", 20)?;
//! service.add_addon(&mut draft, "buttercream", 1)?;
//! service.set_fulfillment(&mut draft, FulfillmentType::Pickup, Some(when), None);
//!
//! // Submit and track
//! let order = service.submit(&draft).await?;
//! service.confirm(&order.order_number).await?;
//! service.process_deposit(&order.order_number, order.pricing.deposit_required, "CARD").await?;
//! ```

pub mod draft;
pub mod error;
pub mod leadtime;
pub mod order;
pub mod pricing;
pub mod product;
pub mod repository;
pub mod service;

// Re-exports for convenience
pub use draft::OrderDraft;
pub use error::{OrderError, OrderResult};
pub use order::{CustomOrder, OrderStatus, PaymentStatus};
pub use pricing::{
    AddOnSelection, FulfillmentType, PriceBreakdown, DELIVERY_FEE, DEPOSIT_RATE, VAT_RATE,
};
pub use product::{
    AddOn, AddOnCatalog, AddOnCategory, AddOnPriceType, CatalogFile, Product, ProductCatalog,
    SelectionMode,
};
pub use repository::{BoxedOrderRepository, OrderRepository, OrderStatistics};
pub use service::OrderService;
