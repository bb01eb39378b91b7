//! # Routes
//!
//! Axum router configuration for the order API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /api/v1/products - List orderable products
///   - GET  /api/v1/products/{code} - Get product by code
///   - GET  /api/v1/addons - List add-ons and category rules
///
/// - Draft sessions (one per customer):
///   - POST   /api/v1/drafts - Start a draft
///   - GET    /api/v1/drafts/{customer_id} - Get the active draft
///   - DELETE /api/v1/drafts/{customer_id} - Discard the draft
///   - POST   /api/v1/drafts/{customer_id}/addons - Add/update an add-on
///   - DELETE /api/v1/drafts/{customer_id}/addons/{addon_code} - Remove it
///   - PUT    /api/v1/drafts/{customer_id}/message - Message/instructions
///   - PUT    /api/v1/drafts/{customer_id}/discount - Discount amount
///   - PUT    /api/v1/drafts/{customer_id}/fulfillment - Pickup/delivery
///   - POST   /api/v1/drafts/{customer_id}/submit - Submit as an order
///
/// - Orders:
///   - GET  /api/v1/orders?customer_id=|status= - List orders
///   - GET  /api/v1/orders/{n} - Get one order
///   - POST /api/v1/orders/{n}/status - Explicit status transition
///   - POST /api/v1/orders/{n}/advance - Next production step
///   - POST /api/v1/orders/{n}/cancel - Cancel with reason/actor
///   - POST /api/v1/orders/{n}/deposit - Pay deposit or full total
///   - POST /api/v1/orders/{n}/refund - Flag as refunded
///   - PUT  /api/v1/orders/{n}/notes - Admin notes
///   - PUT  /api/v1/orders/{n}/assignments - Baker/decorator
///   - GET  /api/v1/stats - Order-book statistics
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{product_code}", get(handlers::get_product))
        .route("/addons", get(handlers::list_addons));

    let draft_routes = Router::new()
        .route("/drafts", post(handlers::create_draft))
        .route(
            "/drafts/{customer_id}",
            get(handlers::get_draft).delete(handlers::discard_draft),
        )
        .route("/drafts/{customer_id}/addons", post(handlers::add_addon))
        .route(
            "/drafts/{customer_id}/addons/{addon_code}",
            delete(handlers::remove_addon),
        )
        .route("/drafts/{customer_id}/message", put(handlers::set_message))
        .route("/drafts/{customer_id}/discount", put(handlers::set_discount))
        .route(
            "/drafts/{customer_id}/fulfillment",
            put(handlers::set_fulfillment),
        )
        .route("/drafts/{customer_id}/submit", post(handlers::submit_draft));

    let order_routes = Router::new()
        .route("/orders", get(handlers::list_orders))
        .route("/orders/{order_number}", get(handlers::get_order))
        .route("/orders/{order_number}/status", post(handlers::update_status))
        .route("/orders/{order_number}/advance", post(handlers::advance_order))
        .route("/orders/{order_number}/cancel", post(handlers::cancel_order))
        .route("/orders/{order_number}/deposit", post(handlers::pay_deposit))
        .route("/orders/{order_number}/refund", post(handlers::refund_order))
        .route("/orders/{order_number}/notes", put(handlers::set_notes))
        .route(
            "/orders/{order_number}/assignments",
            put(handlers::assign_staff),
        )
        .route("/stats", get(handlers::stats));

    let api_routes = Router::new()
        .merge(catalog_routes)
        .merge(draft_routes)
        .merge(order_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
