//! # Request Handlers
//!
//! Axum request handlers for the order API: draft sessions keyed by
//! customer, lifecycle operations on persisted orders, and catalog reads.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cake_core::{
    CustomOrder, FulfillmentType, OrderDraft, OrderError, OrderService, OrderStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Start-draft request
#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    pub customer_id: String,
    pub product_code: String,
    pub servings: u32,
}

/// Add-on selection request
#[derive(Debug, Deserialize)]
pub struct AddAddOnRequest {
    pub addon_code: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Message / special-instructions update
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message_on_item: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// Discount update
#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    pub amount: Decimal,
}

/// Fulfillment update
#[derive(Debug, Deserialize)]
pub struct FulfillmentRequest {
    pub fulfillment_type: FulfillmentType,
    #[serde(default)]
    pub pickup_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_address_id: Option<String>,
}

/// Explicit status transition
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// Cancellation request
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
    pub actor: String,
}

/// Deposit payment request
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: Decimal,
    pub method: String,
}

/// Admin notes update
#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Staff assignment update
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    #[serde(default)]
    pub baker: Option<String>,
    #[serde(default)]
    pub decorator: Option<String>,
}

/// Order listing filter
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn order_error_to_response(err: OrderError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

fn draft_not_found(customer_id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            format!("No active draft for customer: {customer_id}"),
            404,
        )),
    )
}

// =============================================================================
// Health & Catalog
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "crumbcart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List orderable products
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products: Vec<_> = state.service.products().active_products().collect();
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .service
        .products()
        .find_by_code(&product_code)
        .ok_or_else(|| {
            order_error_to_response(OrderError::ProductNotFound {
                product_code: product_code.clone(),
            })
        })?;

    Ok(Json(product.clone()))
}

/// List orderable add-ons with their category rules
pub async fn list_addons(State(state): State<AppState>) -> impl IntoResponse {
    let addons: Vec<_> = state.service.addons().active_addons().collect();
    Json(serde_json::json!({
        "addons": addons,
        "categories": state.service.addons().categories,
        "count": addons.len()
    }))
}

// =============================================================================
// Draft Sessions
// =============================================================================

/// Start a draft for a customer. A customer has at most one active draft;
/// discard the old one first to start over.
#[instrument(skip(state, request), fields(customer_id = %request.customer_id))]
pub async fn create_draft(
    State(state): State<AppState>,
    Json(request): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<OrderDraft>), ApiError> {
    let mut drafts = state.drafts.write().await;
    if drafts.contains_key(&request.customer_id) {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                format!(
                    "Customer {} already has an active draft",
                    request.customer_id
                ),
                409,
            )),
        ));
    }

    let draft = state
        .service
        .start_draft(&request.customer_id, &request.product_code, request.servings)
        .map_err(order_error_to_response)?;

    info!(
        customer_id = %request.customer_id,
        product_code = %request.product_code,
        "draft started"
    );
    drafts.insert(request.customer_id.clone(), draft.clone());
    Ok((StatusCode::CREATED, Json(draft)))
}

/// Fetch the customer's active draft
pub async fn get_draft(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<OrderDraft>, ApiError> {
    let drafts = state.drafts.read().await;
    let draft = drafts
        .get(&customer_id)
        .ok_or_else(|| draft_not_found(&customer_id))?;
    Ok(Json(draft.clone()))
}

/// Discard the customer's active draft (never persisted)
pub async fn discard_draft(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut drafts = state.drafts.write().await;
    drafts
        .remove(&customer_id)
        .ok_or_else(|| draft_not_found(&customer_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a mutation to the customer's draft and return the updated draft
async fn with_draft<F>(
    state: &AppState,
    customer_id: &str,
    mutate: F,
) -> Result<Json<OrderDraft>, ApiError>
where
    F: FnOnce(&OrderService, &mut OrderDraft) -> Result<(), OrderError>,
{
    let mut drafts = state.drafts.write().await;
    let draft = drafts
        .get_mut(customer_id)
        .ok_or_else(|| draft_not_found(customer_id))?;
    mutate(&state.service, draft).map_err(order_error_to_response)?;
    Ok(Json(draft.clone()))
}

/// Add an add-on (or update its quantity)
#[instrument(skip(state, request), fields(customer_id = %customer_id, addon = %request.addon_code))]
pub async fn add_addon(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<AddAddOnRequest>,
) -> Result<Json<OrderDraft>, ApiError> {
    with_draft(&state, &customer_id, |service, draft| {
        service.add_addon(draft, &request.addon_code, request.quantity)
    })
    .await
}

/// Remove an add-on
pub async fn remove_addon(
    State(state): State<AppState>,
    Path((customer_id, addon_code)): Path<(String, String)>,
) -> Result<Json<OrderDraft>, ApiError> {
    with_draft(&state, &customer_id, |service, draft| {
        service.remove_addon(draft, &addon_code)
    })
    .await
}

/// Update cake message and/or kitchen instructions
pub async fn set_message(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<OrderDraft>, ApiError> {
    with_draft(&state, &customer_id, |service, draft| {
        service.set_message(draft, request.message_on_item);
        service.set_special_instructions(draft, request.special_instructions);
        Ok(())
    })
    .await
}

/// Apply a discount to the draft
pub async fn set_discount(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<DiscountRequest>,
) -> Result<Json<OrderDraft>, ApiError> {
    with_draft(&state, &customer_id, |service, draft| {
        service.set_discount(draft, request.amount)
    })
    .await
}

/// Switch pickup/delivery and set the requested instant
pub async fn set_fulfillment(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<FulfillmentRequest>,
) -> Result<Json<OrderDraft>, ApiError> {
    with_draft(&state, &customer_id, |service, draft| {
        service.set_fulfillment(
            draft,
            request.fulfillment_type,
            request.pickup_datetime,
            request.delivery_address_id,
        );
        Ok(())
    })
    .await
}

/// Submit the draft as an order. On success the draft session is closed;
/// on any failure the draft is kept untouched so the caller can retry.
#[instrument(skip(state), fields(customer_id = %customer_id))]
pub async fn submit_draft(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<(StatusCode, Json<CustomOrder>), ApiError> {
    let mut drafts = state.drafts.write().await;
    let draft = drafts
        .get(&customer_id)
        .ok_or_else(|| draft_not_found(&customer_id))?;

    let order = state.service.submit(draft).await.map_err(|e| {
        error!("Submit failed for {}: {}", customer_id, e);
        order_error_to_response(e)
    })?;

    drafts.remove(&customer_id);
    Ok((StatusCode::CREATED, Json(order)))
}

// =============================================================================
// Persisted Orders
// =============================================================================

/// Fetch a single order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .get_order(&order_number)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// List orders by customer or by status
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = match (query.customer_id, query.status) {
        (Some(customer_id), _) => state
            .service
            .orders_for_customer(&customer_id)
            .await
            .map_err(order_error_to_response)?,
        (None, Some(status)) => state
            .service
            .orders_with_status(status)
            .await
            .map_err(order_error_to_response)?,
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "Provide a customer_id or status filter",
                    400,
                )),
            ))
        }
    };

    Ok(Json(serde_json::json!({
        "orders": orders,
        "count": orders.len()
    })))
}

/// Move an order to an explicit status
#[instrument(skip(state, request), fields(order_number = %order_number))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .update_status(&order_number, request.status)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Advance an order one production step
pub async fn advance_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .advance(&order_number)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Cancel an order
#[instrument(skip(state, request), fields(order_number = %order_number))]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .cancel(&order_number, &request.reason, &request.actor)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Pay the deposit (or the full total) on an order
#[instrument(skip(state, request), fields(order_number = %order_number))]
pub async fn pay_deposit(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .process_deposit(&order_number, request.amount, &request.method)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Flag a paid order as refunded
pub async fn refund_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .refund(&order_number)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Replace the admin notes
pub async fn set_notes(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<NotesRequest>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .set_admin_notes(&order_number, request.notes)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Assign baker/decorator
pub async fn assign_staff(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<CustomOrder>, ApiError> {
    let order = state
        .service
        .assign_staff(&order_number, request.baker, request.decorator)
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(order))
}

/// Order-book statistics
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .service
        .statistics()
        .await
        .map_err(order_error_to_response)?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_order_error_conversion() {
        let err = OrderError::Validation("bad data".to_string());
        let (status, _json) = order_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err = OrderError::InsufficientDeposit {
            required: dec!(952.00),
            offered: dec!(10.00),
        };
        let (status, _json) = order_error_to_response(err);
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_fulfillment_request_wire_names() {
        let request: FulfillmentRequest = serde_json::from_str(
            r#"{"fulfillment_type": "DELIVERY", "delivery_address_id": "addr-1"}"#,
        )
        .unwrap();
        assert_eq!(request.fulfillment_type, FulfillmentType::Delivery);
        assert!(request.pickup_datetime.is_none());
    }

    #[test]
    fn test_status_request_wire_names() {
        let request: StatusRequest =
            serde_json::from_str(r#"{"status": "IN_PRODUCTION"}"#).unwrap();
        assert_eq!(request.status, OrderStatus::InProduction);
    }
}
