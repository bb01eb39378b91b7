//! # Order Draft
//!
//! An in-progress, unpersisted order being assembled by a customer.
//!
//! The draft recomputes its price breakdown after every mutation; the
//! breakdown is derived state and is never edited directly. Drafts are
//! mutated exclusively through `OrderService` methods, which resolve
//! catalog codes and enforce category rules before touching the draft.

use crate::pricing::{self, AddOnSelection, FulfillmentType, PriceBreakdown};
use crate::product::{AddOn, Product};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An unpersisted order configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    /// The customer assembling this draft
    pub customer_id: String,

    /// The chosen base product (frozen copy, catalog is the source of truth)
    pub product: Product,

    /// Servings, within the product's min/max at submission time
    pub servings: u32,

    /// Selected add-ons keyed by add-on code; no duplicates by construction
    pub add_ons: BTreeMap<String, AddOnSelection>,

    /// Message piped/printed on the item itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_on_item: Option<String>,

    /// Free-text instructions for the kitchen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,

    /// Pickup or delivery
    pub fulfillment_type: FulfillmentType,

    /// Requested fulfillment instant; required before submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_datetime: Option<DateTime<Utc>>,

    /// Delivery address reference; present only for delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address_id: Option<String>,

    /// Admin/promotion discount applied before tax
    pub discount_amount: Decimal,

    /// Derived price breakdown; recomputed, never independently mutated
    pub pricing: PriceBreakdown,
}

impl OrderDraft {
    /// Start a draft for a resolved product. Servings are validated by the
    /// service before this is called.
    pub fn new(customer_id: impl Into<String>, product: Product, servings: u32) -> Self {
        let pricing = pricing::calculate(
            &product,
            servings,
            &[],
            Decimal::ZERO,
            FulfillmentType::Pickup,
        );
        Self {
            customer_id: customer_id.into(),
            product,
            servings,
            add_ons: BTreeMap::new(),
            message_on_item: None,
            special_instructions: None,
            fulfillment_type: FulfillmentType::Pickup,
            pickup_datetime: None,
            delivery_address_id: None,
            discount_amount: Decimal::ZERO,
            pricing,
        }
    }

    /// Insert or update an add-on selection and recompute the breakdown
    pub fn put_addon(&mut self, addon: AddOn, quantity: u32) {
        self.add_ons.insert(
            addon.addon_code.clone(),
            AddOnSelection::new(addon, quantity),
        );
        self.recompute();
    }

    /// Remove an add-on selection and recompute the breakdown.
    /// Returns false if the code was not selected.
    pub fn remove_addon(&mut self, addon_code: &str) -> bool {
        let removed = self.add_ons.remove(addon_code).is_some();
        if removed {
            self.recompute();
        }
        removed
    }

    /// Codes of selected add-ons in a given category
    pub fn selected_in_category<'a>(
        &'a self,
        category_code: &'a str,
    ) -> impl Iterator<Item = &'a AddOnSelection> {
        self.add_ons
            .values()
            .filter(move |sel| sel.addon.category_code == category_code)
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message_on_item = message;
    }

    pub fn set_special_instructions(&mut self, instructions: Option<String>) {
        self.special_instructions = instructions;
    }

    /// Set the discount amount and recompute the breakdown
    pub fn set_discount(&mut self, amount: Decimal) {
        self.discount_amount = amount;
        self.recompute();
    }

    /// Switch fulfillment. Pickup clears delivery-specific fields and zeroes
    /// the delivery fee; delivery records the address reference.
    pub fn set_fulfillment(
        &mut self,
        fulfillment: FulfillmentType,
        pickup_datetime: Option<DateTime<Utc>>,
        delivery_address_id: Option<String>,
    ) {
        self.fulfillment_type = fulfillment;
        self.pickup_datetime = pickup_datetime;
        self.delivery_address_id = match fulfillment {
            FulfillmentType::Pickup => None,
            FulfillmentType::Delivery => delivery_address_id,
        };
        self.recompute();
    }

    /// Recompute the derived breakdown from current draft state.
    ///
    /// The discount is capped at the subtotal; if a mutation shrinks the
    /// subtotal below a previously set discount, the discount is clamped
    /// down so the breakdown never goes negative.
    fn recompute(&mut self) {
        let selections: Vec<AddOnSelection> = self.add_ons.values().cloned().collect();
        let mut pricing = pricing::calculate(
            &self.product,
            self.servings,
            &selections,
            self.discount_amount,
            self.fulfillment_type,
        );
        if self.discount_amount > pricing.subtotal {
            self.discount_amount = pricing.subtotal;
            pricing = pricing::calculate(
                &self.product,
                self.servings,
                &selections,
                self.discount_amount,
                self.fulfillment_type,
            );
        }
        self.pricing = pricing;
    }
}
