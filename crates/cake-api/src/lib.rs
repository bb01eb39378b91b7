//! # cake-api
//!
//! HTTP API layer for the crumbcart bakery service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Draft session endpoints (one active draft per customer)
//! - Order lifecycle endpoints backed by `cake-core`
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/addons` | List add-ons |
//! | POST | `/api/v1/drafts` | Start a draft |
//! | POST | `/api/v1/drafts/:customer_id/submit` | Submit draft |
//! | POST | `/api/v1/orders/:n/status` | Transition order |
//! | POST | `/api/v1/orders/:n/deposit` | Pay deposit |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
