//! # Order Service
//!
//! Orchestrates draft assembly, submission, and lifecycle transitions on
//! persisted orders. Constructed once with its collaborators and passed by
//! reference; there is no hidden global state.
//!
//! Submission is atomic from the caller's point of view: the draft is only
//! borrowed, so a repository failure leaves it untouched and retryable.

use crate::draft::OrderDraft;
use crate::error::{OrderError, OrderResult};
use crate::leadtime;
use crate::order::{CustomOrder, OrderStatus};
use crate::pricing::FulfillmentType;
use crate::product::{AddOnCatalog, ProductCatalog, SelectionMode};
use crate::repository::{BoxedOrderRepository, OrderStatistics};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

/// The order engine's orchestration layer
pub struct OrderService {
    products: ProductCatalog,
    addons: AddOnCatalog,
    repository: BoxedOrderRepository,
}

impl OrderService {
    /// Build the service from its collaborators
    pub fn new(
        products: ProductCatalog,
        addons: AddOnCatalog,
        repository: BoxedOrderRepository,
    ) -> Self {
        Self {
            products,
            addons,
            repository,
        }
    }

    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }

    pub fn addons(&self) -> &AddOnCatalog {
        &self.addons
    }

    // =========================================================================
    // Draft assembly
    // =========================================================================

    /// Start a draft for a customer: resolve the product, validate servings,
    /// and compute the initial breakdown.
    pub fn start_draft(
        &self,
        customer_id: &str,
        product_code: &str,
        servings: u32,
    ) -> OrderResult<OrderDraft> {
        let product = self
            .products
            .find_by_code(product_code)
            .filter(|p| p.active)
            .ok_or_else(|| OrderError::ProductNotFound {
                product_code: product_code.to_string(),
            })?;

        if !product.servings_in_range(servings) {
            return Err(OrderError::ServingsOutOfRange {
                servings,
                min: product.min_servings,
                max: product.max_servings,
            });
        }

        Ok(OrderDraft::new(customer_id, product.clone(), servings))
    }

    /// Add an add-on to the draft (or update its quantity), enforcing the
    /// category's selection rules.
    pub fn add_addon(
        &self,
        draft: &mut OrderDraft,
        addon_code: &str,
        quantity: u32,
    ) -> OrderResult<()> {
        if quantity == 0 {
            return Err(OrderError::Validation(
                "add-on quantity must be positive".into(),
            ));
        }

        let addon = self
            .addons
            .find_by_code(addon_code)
            .filter(|a| a.active)
            .ok_or_else(|| OrderError::AddOnNotFound {
                addon_code: addon_code.to_string(),
            })?;

        if let Some(category) = self.addons.category(&addon.category_code) {
            // Other selections already in this category (a re-add of the
            // same code is a quantity update, not a new selection).
            let others = draft
                .selected_in_category(&category.category_code)
                .filter(|sel| sel.addon.addon_code != addon.addon_code)
                .count() as u32;

            match category.selection {
                SelectionMode::Single if others > 0 => {
                    return Err(OrderError::Validation(format!(
                        "category '{}' allows a single selection",
                        category.category_code
                    )));
                }
                SelectionMode::Multiple => {
                    if let Some(max) = category.max_selections {
                        if others + 1 > max {
                            return Err(OrderError::Validation(format!(
                                "category '{}' allows at most {} selections",
                                category.category_code, max
                            )));
                        }
                    }
                }
                SelectionMode::Single => {}
            }
        }

        draft.put_addon(addon.clone(), quantity);
        Ok(())
    }

    /// Remove an add-on from the draft. Unknown codes are a validation
    /// failure; removing an unselected add-on is a no-op.
    pub fn remove_addon(&self, draft: &mut OrderDraft, addon_code: &str) -> OrderResult<()> {
        if self.addons.find_by_code(addon_code).is_none() {
            return Err(OrderError::AddOnNotFound {
                addon_code: addon_code.to_string(),
            });
        }
        draft.remove_addon(addon_code);
        Ok(())
    }

    pub fn set_message(&self, draft: &mut OrderDraft, message: Option<String>) {
        draft.set_message(message);
    }

    pub fn set_special_instructions(&self, draft: &mut OrderDraft, instructions: Option<String>) {
        draft.set_special_instructions(instructions);
    }

    /// Apply a discount to the draft; bounded by the current subtotal
    pub fn set_discount(&self, draft: &mut OrderDraft, amount: Decimal) -> OrderResult<()> {
        if amount < Decimal::ZERO {
            return Err(OrderError::Validation(
                "discount must not be negative".into(),
            ));
        }
        if amount > draft.pricing.subtotal {
            return Err(OrderError::Validation(format!(
                "discount {} exceeds subtotal {}",
                amount, draft.pricing.subtotal
            )));
        }
        draft.set_discount(amount);
        Ok(())
    }

    /// Switch pickup/delivery. The delivery address may still be deferred
    /// here; submission requires it.
    pub fn set_fulfillment(
        &self,
        draft: &mut OrderDraft,
        fulfillment: FulfillmentType,
        pickup_datetime: Option<DateTime<Utc>>,
        delivery_address_id: Option<String>,
    ) {
        draft.set_fulfillment(fulfillment, pickup_datetime, delivery_address_id);
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate and persist a draft as a new order.
    ///
    /// The draft is only borrowed: on any failure (including a repository
    /// error) it is left unmodified so the caller can fix it up and retry.
    pub async fn submit(&self, draft: &OrderDraft) -> OrderResult<CustomOrder> {
        let now = Utc::now();

        let pickup_datetime = draft.pickup_datetime.ok_or_else(|| {
            OrderError::Validation("pickup/delivery time must be set before submission".into())
        })?;

        if draft.fulfillment_type == FulfillmentType::Delivery
            && draft.delivery_address_id.is_none()
        {
            return Err(OrderError::Validation(
                "delivery orders need a delivery address".into(),
            ));
        }

        if !draft.product.servings_in_range(draft.servings) {
            return Err(OrderError::ServingsOutOfRange {
                servings: draft.servings,
                min: draft.product.min_servings,
                max: draft.product.max_servings,
            });
        }

        for category in self.addons.required_categories() {
            if draft
                .selected_in_category(&category.category_code)
                .next()
                .is_none()
            {
                return Err(OrderError::Validation(format!(
                    "category '{}' requires a selection",
                    category.category_code
                )));
            }
        }

        leadtime::validate(pickup_datetime, &draft.product, now)?;

        let order_number = generate_order_number();
        let order = CustomOrder::from_draft(&order_number, draft, pickup_datetime, now);

        if !self.repository.insert(&order).await? {
            warn!(%order_number, "order number collision on insert");
            return Err(OrderError::Repository(format!(
                "order number already exists: {order_number}"
            )));
        }

        info!(
            %order_number,
            customer_id = %order.customer_id,
            product_code = %order.product_code,
            total = %order.pricing.total_amount,
            "order submitted"
        );
        Ok(order)
    }

    // =========================================================================
    // Lifecycle on persisted orders
    // =========================================================================

    /// Fetch one order
    pub async fn get_order(&self, order_number: &str) -> OrderResult<CustomOrder> {
        self.repository
            .find_by_order_number(order_number)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound {
                order_number: order_number.to_string(),
            })
    }

    /// All orders for a customer
    pub async fn orders_for_customer(&self, customer_id: &str) -> OrderResult<Vec<CustomOrder>> {
        self.repository.find_by_customer_id(customer_id).await
    }

    /// All orders in a status
    pub async fn orders_with_status(&self, status: OrderStatus) -> OrderResult<Vec<CustomOrder>> {
        self.repository.find_by_status(status).await
    }

    /// Move an order to an explicit target status
    pub async fn update_status(
        &self,
        order_number: &str,
        to: OrderStatus,
    ) -> OrderResult<CustomOrder> {
        let order = self
            .apply(order_number, |order| order.transition_to(to, Utc::now()))
            .await?;
        info!(order_number, status = ?to, "order status updated");
        Ok(order)
    }

    /// Confirm a pending order
    pub async fn confirm(&self, order_number: &str) -> OrderResult<CustomOrder> {
        self.update_status(order_number, OrderStatus::Confirmed)
            .await
    }

    /// Advance an order one step along the production chain
    pub async fn advance(&self, order_number: &str) -> OrderResult<CustomOrder> {
        let current = self.get_order(order_number).await?;
        let next = current
            .order_status
            .next_forward()
            .ok_or(OrderError::InvalidTransition {
                from: current.order_status,
                to: current.order_status,
            })?;
        self.update_status(order_number, next).await
    }

    /// Cancel an order with a reason and acting user
    pub async fn cancel(
        &self,
        order_number: &str,
        reason: &str,
        actor: &str,
    ) -> OrderResult<CustomOrder> {
        let order = self
            .apply(order_number, |order| {
                order.cancel(reason, actor, Utc::now())
            })
            .await?;
        info!(order_number, actor, "order cancelled");
        Ok(order)
    }

    /// Record a deposit payment against an order
    pub async fn process_deposit(
        &self,
        order_number: &str,
        amount: Decimal,
        method: &str,
    ) -> OrderResult<CustomOrder> {
        let order = self
            .apply(order_number, |order| {
                order.process_deposit(amount, method, Utc::now())
            })
            .await?;
        info!(
            order_number,
            amount = %amount,
            status = ?order.payment_status,
            "deposit processed"
        );
        Ok(order)
    }

    /// Flag a paid order as refunded
    pub async fn refund(&self, order_number: &str) -> OrderResult<CustomOrder> {
        self.apply(order_number, |order| order.refund(Utc::now()))
            .await
    }

    /// Replace the admin notes on an order
    pub async fn set_admin_notes(
        &self,
        order_number: &str,
        notes: Option<String>,
    ) -> OrderResult<CustomOrder> {
        self.apply(order_number, |order| {
            order.set_admin_notes(notes, Utc::now());
            Ok(())
        })
        .await
    }

    /// Assign production staff to an order
    pub async fn assign_staff(
        &self,
        order_number: &str,
        baker: Option<String>,
        decorator: Option<String>,
    ) -> OrderResult<CustomOrder> {
        self.apply(order_number, |order| {
            let now = Utc::now();
            if let Some(name) = baker {
                order.assign_baker(name, now);
            }
            if let Some(name) = decorator {
                order.assign_decorator(name, now);
            }
            Ok(())
        })
        .await
    }

    /// Aggregate order-book statistics
    pub async fn statistics(&self) -> OrderResult<OrderStatistics> {
        self.repository.statistics().await
    }

    /// Read-mutate-write with a compare-and-swap on the order's version.
    /// A stale read surfaces as `VersionConflict`; the caller retries.
    async fn apply<F>(&self, order_number: &str, mutate: F) -> OrderResult<CustomOrder>
    where
        F: FnOnce(&mut CustomOrder) -> OrderResult<()>,
    {
        let mut order = self.get_order(order_number).await?;
        let expected = order.version;
        mutate(&mut order)?;

        if !self.repository.update(&order, expected).await? {
            return Err(OrderError::VersionConflict {
                order_number: order_number.to_string(),
            });
        }
        order.version = expected + 1;
        Ok(order)
    }
}

/// Opaque unique order number; the format is not part of any contract
fn generate_order_number() -> String {
    format!("ORD-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::PaymentStatus;
    use crate::product::{AddOn, AddOnCategory, AddOnPriceType, Product};
    use crate::repository::OrderRepository;
    use async_trait::async_trait;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Minimal repository for service tests; `cake-store` has the real one.
    #[derive(Default)]
    struct TestRepo {
        orders: Mutex<HashMap<String, CustomOrder>>,
        fail_inserts: bool,
    }

    #[async_trait]
    impl OrderRepository for TestRepo {
        async fn insert(&self, order: &CustomOrder) -> OrderResult<bool> {
            if self.fail_inserts {
                return Err(OrderError::Repository("store offline".into()));
            }
            let mut orders = self.orders.lock().unwrap();
            if orders.contains_key(&order.order_number) {
                return Ok(false);
            }
            orders.insert(order.order_number.clone(), order.clone());
            Ok(true)
        }

        async fn find_by_order_number(
            &self,
            order_number: &str,
        ) -> OrderResult<Option<CustomOrder>> {
            Ok(self.orders.lock().unwrap().get(order_number).cloned())
        }

        async fn find_by_customer_id(&self, customer_id: &str) -> OrderResult<Vec<CustomOrder>> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<CustomOrder>> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.order_status == status)
                .cloned()
                .collect())
        }

        async fn update(&self, order: &CustomOrder, expected_version: u64) -> OrderResult<bool> {
            let mut orders = self.orders.lock().unwrap();
            match orders.get_mut(&order.order_number) {
                Some(stored) if stored.version == expected_version => {
                    let mut updated = order.clone();
                    updated.version = expected_version + 1;
                    *stored = updated;
                    Ok(true)
                }
                Some(_) => Ok(false),
                None => Ok(false),
            }
        }

        async fn statistics(&self) -> OrderResult<OrderStatistics> {
            Ok(OrderStatistics::default())
        }
    }

    fn catalog() -> (ProductCatalog, AddOnCatalog) {
        let products = ProductCatalog {
            products: vec![Product {
                product_code: "choc-fudge-round".into(),
                name: "Chocolate Fudge Round".into(),
                description: String::new(),
                base_price: dec!(500.00),
                price_per_serving: dec!(50.00),
                min_servings: 8,
                max_servings: 60,
                preparation_hours: 48,
                active: true,
            }],
        };
        let addons = AddOnCatalog {
            addons: vec![
                AddOn {
                    addon_code: "buttercream".into(),
                    name: "Buttercream Frosting".into(),
                    price_modifier: dec!(10.00),
                    price_type: AddOnPriceType::PerServing,
                    category_code: "frosting".into(),
                    active: true,
                },
                AddOn {
                    addon_code: "fondant".into(),
                    name: "Fondant Finish".into(),
                    price_modifier: dec!(15.00),
                    price_type: AddOnPriceType::PerServing,
                    category_code: "frosting".into(),
                    active: true,
                },
                AddOn {
                    addon_code: "candle-set".into(),
                    name: "Candle Set".into(),
                    price_modifier: dec!(25.00),
                    price_type: AddOnPriceType::Flat,
                    category_code: "toppers".into(),
                    active: true,
                },
                AddOn {
                    addon_code: "cake-topper".into(),
                    name: "Custom Topper".into(),
                    price_modifier: dec!(120.00),
                    price_type: AddOnPriceType::Flat,
                    category_code: "toppers".into(),
                    active: true,
                },
            ],
            categories: vec![
                AddOnCategory {
                    category_code: "frosting".into(),
                    name: "Frosting".into(),
                    selection: SelectionMode::Single,
                    required: true,
                    max_selections: None,
                },
                AddOnCategory {
                    category_code: "toppers".into(),
                    name: "Toppers".into(),
                    selection: SelectionMode::Multiple,
                    required: false,
                    max_selections: Some(1),
                },
            ],
        };
        (products, addons)
    }

    fn service_with(repo: Arc<TestRepo>) -> OrderService {
        let (products, addons) = catalog();
        OrderService::new(products, addons, repo)
    }

    fn ready_draft(service: &OrderService) -> OrderDraft {
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();
        service.add_addon(&mut draft, "buttercream", 1).unwrap();
        service.set_fulfillment(
            &mut draft,
            FulfillmentType::Pickup,
            Some(Utc::now() + Duration::days(7)),
            None,
        );
        draft
    }

    #[test]
    fn test_start_draft_validations() {
        let service = service_with(Arc::new(TestRepo::default()));

        assert!(matches!(
            service.start_draft("cust-1", "nope", 20),
            Err(OrderError::ProductNotFound { .. })
        ));
        assert!(matches!(
            service.start_draft("cust-1", "choc-fudge-round", 7),
            Err(OrderError::ServingsOutOfRange { min: 8, max: 60, .. })
        ));
        assert!(service.start_draft("cust-1", "choc-fudge-round", 8).is_ok());
    }

    #[test]
    fn test_single_choice_category_enforced() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();

        service.add_addon(&mut draft, "buttercream", 1).unwrap();
        // A second frosting is rejected; re-adding the same one is fine.
        assert!(matches!(
            service.add_addon(&mut draft, "fondant", 1),
            Err(OrderError::Validation(_))
        ));
        assert!(service.add_addon(&mut draft, "buttercream", 2).is_ok());

        // Swap after removal works.
        service.remove_addon(&mut draft, "buttercream").unwrap();
        assert!(service.add_addon(&mut draft, "fondant", 1).is_ok());
    }

    #[test]
    fn test_max_selections_enforced() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();

        service.add_addon(&mut draft, "candle-set", 1).unwrap();
        assert!(matches!(
            service.add_addon(&mut draft, "cake-topper", 1),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_addon() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();

        assert!(matches!(
            service.add_addon(&mut draft, "glitter-bomb", 1),
            Err(OrderError::AddOnNotFound { .. })
        ));
        assert!(matches!(
            service.remove_addon(&mut draft, "glitter-bomb"),
            Err(OrderError::AddOnNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let repo = Arc::new(TestRepo::default());
        let service = service_with(repo.clone());
        let draft = ready_draft(&service);

        let order = service.submit(&draft).await.unwrap();
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.balance_due, order.pricing.total_amount);
        assert!(repo
            .find_by_order_number(&order.order_number)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_submit_requires_pickup_time() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();
        service.add_addon(&mut draft, "buttercream", 1).unwrap();

        assert!(matches!(
            service.submit(&draft).await,
            Err(OrderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_requires_delivery_address() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = ready_draft(&service);
        service.set_fulfillment(
            &mut draft,
            FulfillmentType::Delivery,
            Some(Utc::now() + Duration::days(7)),
            None,
        );

        assert!(matches!(
            service.submit(&draft).await,
            Err(OrderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_requires_required_category() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();
        service.set_fulfillment(
            &mut draft,
            FulfillmentType::Pickup,
            Some(Utc::now() + Duration::days(7)),
            None,
        );

        // No frosting selected.
        assert!(matches!(
            service.submit(&draft).await,
            Err(OrderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_enforces_lead_time() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = ready_draft(&service);
        // 48h prep; ask for it in 2 hours.
        draft.pickup_datetime = Some(Utc::now() + Duration::hours(2));

        assert!(matches!(
            service.submit(&draft).await,
            Err(OrderError::LeadTimeViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_failure_leaves_draft_usable() {
        let repo = Arc::new(TestRepo {
            fail_inserts: true,
            ..Default::default()
        });
        let service = service_with(repo);
        let draft = ready_draft(&service);
        let before = draft.clone();

        assert!(matches!(
            service.submit(&draft).await,
            Err(OrderError::Repository(_))
        ));
        // Draft unchanged; a retry against a healthy store would succeed.
        assert_eq!(draft.pricing, before.pricing);
        assert_eq!(draft.add_ons.len(), before.add_ons.len());
    }

    #[tokio::test]
    async fn test_lifecycle_roundtrip() {
        let service = service_with(Arc::new(TestRepo::default()));
        let order = service.submit(&ready_draft(&service)).await.unwrap();
        let n = order.order_number.clone();

        let order = service.confirm(&n).await.unwrap();
        assert_eq!(order.order_status, OrderStatus::Confirmed);

        let order = service.advance(&n).await.unwrap();
        assert_eq!(order.order_status, OrderStatus::InProduction);

        let order = service
            .process_deposit(&n, order.pricing.deposit_required, "CARD")
            .await
            .unwrap();
        assert_eq!(order.payment_status, PaymentStatus::DepositPaid);
        assert_eq!(
            order.balance_due,
            order.pricing.total_amount - order.deposit_paid
        );

        let order = service.advance(&n).await.unwrap();
        let order_final = service.advance(&order.order_number).await.unwrap();
        assert_eq!(order_final.order_status, OrderStatus::Completed);

        // Terminal: no further advance, no cancel.
        assert!(matches!(
            service.advance(&n).await,
            Err(OrderError::InvalidTransition { .. })
        ));
        assert!(matches!(
            service.cancel(&n, "changed mind", "admin").await,
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_illegal_jump_rejected() {
        let service = service_with(Arc::new(TestRepo::default()));
        let order = service.submit(&ready_draft(&service)).await.unwrap();

        assert!(matches!(
            service
                .update_status(&order.order_number, OrderStatus::Ready)
                .await,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Ready,
            })
        ));
    }

    #[tokio::test]
    async fn test_cancel_records_details() {
        let service = service_with(Arc::new(TestRepo::default()));
        let order = service.submit(&ready_draft(&service)).await.unwrap();

        let cancelled = service
            .cancel(&order.order_number, "customer request", "staff-3")
            .await
            .unwrap();
        assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
        assert_eq!(cancelled.cancelled_by.as_deref(), Some("staff-3"));
        assert!(cancelled.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn test_notes_and_assignment() {
        let service = service_with(Arc::new(TestRepo::default()));
        let order = service.submit(&ready_draft(&service)).await.unwrap();

        let order = service
            .set_admin_notes(&order.order_number, Some("allergy: peanuts".into()))
            .await
            .unwrap();
        assert_eq!(order.admin_notes.as_deref(), Some("allergy: peanuts"));

        let order = service
            .assign_staff(&order.order_number, Some("mara".into()), Some("jo".into()))
            .await
            .unwrap();
        assert_eq!(order.assigned_baker.as_deref(), Some("mara"));
        assert_eq!(order.assigned_decorator.as_deref(), Some("jo"));
    }

    #[tokio::test]
    async fn test_submit_after_discount_outlives_addon() {
        // Discount the full subtotal, then remove an add-on so the subtotal
        // drops below it. The persisted order must never total negative.
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = ready_draft(&service);
        service.add_addon(&mut draft, "cake-topper", 1).unwrap();

        let subtotal = draft.pricing.subtotal;
        service.set_discount(&mut draft, subtotal).unwrap();
        service.remove_addon(&mut draft, "cake-topper").unwrap();

        assert_eq!(draft.discount_amount, draft.pricing.subtotal);

        let order = service.submit(&draft).await.unwrap();
        assert_eq!(order.pricing.total_amount, Decimal::ZERO);
        assert_eq!(order.pricing.tax_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_discount_bounds() {
        let service = service_with(Arc::new(TestRepo::default()));
        let mut draft = service.start_draft("cust-1", "choc-fudge-round", 20).unwrap();

        assert!(matches!(
            service.set_discount(&mut draft, dec!(-5)),
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            service.set_discount(&mut draft, dec!(99999)),
            Err(OrderError::Validation(_))
        ));
        assert!(service.set_discount(&mut draft, dec!(100.00)).is_ok());
        assert_eq!(draft.pricing.discount_amount, dec!(100.00));
    }
}
