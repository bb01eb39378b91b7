//! # Persisted Order & Lifecycle
//!
//! `CustomOrder` is the aggregate created when a draft is submitted. Once
//! persisted it is mutated only through the guarded lifecycle methods here,
//! applied by `OrderService` under a compare-and-swap on `version`.
//!
//! The status machine is an explicit transition table. The system this
//! replaces accepted any target status unchecked; the guard here is a
//! required correctness fix, not an enhancement.

use crate::draft::OrderDraft;
use crate::error::{OrderError, OrderResult};
use crate::pricing::{AddOnSelection, FulfillmentType, PriceBreakdown};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Production status of a persisted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation
    Pending,
    /// Confirmed by the shop (deposit normally received)
    Confirmed,
    /// Being baked/decorated
    InProduction,
    /// Ready for pickup or dispatch
    Ready,
    /// Handed over; terminal
    Completed,
    /// Cancelled; terminal
    Cancelled,
}

impl OrderStatus {
    /// COMPLETED and CANCELLED accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The transition table: strictly forward along the production chain,
    /// plus any non-terminal state to CANCELLED.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, to) {
            (Pending, Confirmed)
            | (Confirmed, InProduction)
            | (InProduction, Ready)
            | (Ready, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// The next forward status in the production chain, if any
    pub fn next_forward(self) -> Option<OrderStatus> {
        use OrderStatus::*;
        match self {
            Pending => Some(Confirmed),
            Confirmed => Some(InProduction),
            InProduction => Some(Ready),
            Ready => Some(Completed),
            Completed | Cancelled => None,
        }
    }
}

/// Payment status of a persisted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Pending,
    /// Deposit received, balance outstanding
    DepositPaid,
    /// Paid in full
    FullyPaid,
    /// Refunded after payment
    Refunded,
}

impl PaymentStatus {
    /// Whether any money has been taken (refund is only legal from here)
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::DepositPaid | PaymentStatus::FullyPaid)
    }
}

/// A persisted bespoke order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomOrder {
    /// Opaque unique order number, assigned at submission, immutable
    pub order_number: String,

    /// The customer who placed the order
    pub customer_id: String,

    /// Frozen product code
    pub product_code: String,

    /// Frozen servings count
    pub servings: u32,

    /// Frozen add-on selections
    pub add_ons: Vec<AddOnSelection>,

    /// Message piped/printed on the item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_on_item: Option<String>,

    /// Free-text kitchen instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,

    /// Pickup or delivery
    pub fulfillment_type: FulfillmentType,

    /// Requested fulfillment instant
    pub pickup_datetime: DateTime<Utc>,

    /// Delivery address reference; present only for delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address_id: Option<String>,

    /// Delivery instant; mirrors `pickup_datetime` for delivery orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_datetime: Option<DateTime<Utc>>,

    /// Frozen price breakdown
    #[serde(flatten)]
    pub pricing: PriceBreakdown,

    /// Amount paid up front
    pub deposit_paid: Decimal,

    /// How the deposit was paid (opaque method label)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_payment_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_paid_at: Option<DateTime<Utc>>,

    /// `total_amount - deposit_paid`
    pub balance_due: Decimal,

    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,

    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_baker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_decorator: Option<String>,

    /// Optimistic-concurrency counter, bumped by the store on every write
    #[serde(default)]
    pub version: u64,
}

impl CustomOrder {
    /// Freeze a submitted draft into a persisted-shape order.
    ///
    /// The caller (the service) has already validated servings, lead time,
    /// and category rules; `pickup_datetime` is guaranteed present.
    pub fn from_draft(
        order_number: impl Into<String>,
        draft: &OrderDraft,
        pickup_datetime: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let delivery_datetime = match draft.fulfillment_type {
            FulfillmentType::Pickup => None,
            FulfillmentType::Delivery => Some(pickup_datetime),
        };

        Self {
            order_number: order_number.into(),
            customer_id: draft.customer_id.clone(),
            product_code: draft.product.product_code.clone(),
            servings: draft.servings,
            add_ons: draft.add_ons.values().cloned().collect(),
            message_on_item: draft.message_on_item.clone(),
            special_instructions: draft.special_instructions.clone(),
            fulfillment_type: draft.fulfillment_type,
            pickup_datetime,
            delivery_address_id: draft.delivery_address_id.clone(),
            delivery_datetime,
            pricing: draft.pricing.clone(),
            deposit_paid: Decimal::ZERO,
            deposit_payment_method: None,
            deposit_paid_at: None,
            balance_due: draft.pricing.total_amount,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            admin_notes: None,
            cancellation_reason: None,
            cancelled_at: None,
            cancelled_by: None,
            created_at: now,
            confirmed_at: None,
            completed_at: None,
            updated_at: now,
            assigned_baker: None,
            assigned_decorator: None,
            version: 0,
        }
    }

    /// Move the order forward along the production chain.
    ///
    /// Cancellation goes through [`CustomOrder::cancel`], which records the
    /// reason; a bare transition to CANCELLED is rejected here.
    pub fn transition_to(&mut self, to: OrderStatus, now: DateTime<Utc>) -> OrderResult<()> {
        if to == OrderStatus::Cancelled {
            return Err(OrderError::Validation(
                "cancellation requires a reason and actor; use cancel".into(),
            ));
        }
        if !self.order_status.can_transition_to(to) {
            return Err(OrderError::InvalidTransition {
                from: self.order_status,
                to,
            });
        }

        self.order_status = to;
        match to {
            OrderStatus::Confirmed => self.confirmed_at = Some(now),
            OrderStatus::Completed => self.completed_at = Some(now),
            _ => {}
        }
        self.updated_at = now;
        Ok(())
    }

    /// Cancel the order with a non-empty reason
    pub fn cancel(
        &mut self,
        reason: &str,
        actor: &str,
        now: DateTime<Utc>,
    ) -> OrderResult<()> {
        if reason.trim().is_empty() {
            return Err(OrderError::Validation(
                "cancellation reason must not be empty".into(),
            ));
        }
        if !self.order_status.can_transition_to(OrderStatus::Cancelled) {
            return Err(OrderError::InvalidTransition {
                from: self.order_status,
                to: OrderStatus::Cancelled,
            });
        }

        self.order_status = OrderStatus::Cancelled;
        self.cancellation_reason = Some(reason.trim().to_string());
        self.cancelled_at = Some(now);
        self.cancelled_by = Some(actor.to_string());
        self.updated_at = now;
        Ok(())
    }

    /// Record a deposit payment.
    ///
    /// The amount must cover the required deposit; covering the full total
    /// settles the order outright. Terminal orders take no further payments.
    pub fn process_deposit(
        &mut self,
        amount: Decimal,
        method: &str,
        now: DateTime<Utc>,
    ) -> OrderResult<()> {
        if self.order_status.is_terminal() {
            return Err(OrderError::Validation(format!(
                "cannot record a payment on a {:?} order",
                self.order_status
            )));
        }
        match self.payment_status {
            PaymentStatus::Pending | PaymentStatus::DepositPaid => {}
            from => {
                return Err(OrderError::InvalidPaymentTransition {
                    from,
                    to: PaymentStatus::DepositPaid,
                })
            }
        }
        if amount < self.pricing.deposit_required {
            return Err(OrderError::InsufficientDeposit {
                required: self.pricing.deposit_required,
                offered: amount,
            });
        }

        self.deposit_paid = amount;
        self.deposit_payment_method = Some(method.to_string());
        self.deposit_paid_at = Some(now);
        self.payment_status = if amount >= self.pricing.total_amount {
            PaymentStatus::FullyPaid
        } else {
            PaymentStatus::DepositPaid
        };
        self.balance_due = self.pricing.balance_due(self.deposit_paid);
        self.updated_at = now;
        Ok(())
    }

    /// Flag a paid order as refunded. Moving the money back is the payment
    /// collaborator's concern, not this engine's.
    pub fn refund(&mut self, now: DateTime<Utc>) -> OrderResult<()> {
        if !self.payment_status.is_paid() {
            return Err(OrderError::InvalidPaymentTransition {
                from: self.payment_status,
                to: PaymentStatus::Refunded,
            });
        }
        self.payment_status = PaymentStatus::Refunded;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_admin_notes(&mut self, notes: Option<String>, now: DateTime<Utc>) {
        self.admin_notes = notes;
        self.updated_at = now;
    }

    pub fn assign_baker(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.assigned_baker = Some(name.into());
        self.updated_at = now;
    }

    pub fn assign_decorator(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.assigned_decorator = Some(name.into());
        self.updated_at = now;
    }
}
