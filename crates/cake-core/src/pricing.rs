//! # Pricing Calculator
//!
//! Pure price-breakdown computation for bespoke orders.
//!
//! All monetary values are `rust_decimal::Decimal` rounded to 2 fractional
//! digits after every derived step, so recomputing a breakdown from the same
//! inputs always yields the same result.

use crate::product::{AddOn, AddOnPriceType, Product};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat VAT applied to the discounted subtotal
pub const VAT_RATE: Decimal = dec!(0.12);

/// Flat fee charged on delivery orders
pub const DELIVERY_FEE: Decimal = dec!(200.00);

/// Share of the pre-discount total required up front
pub const DEPOSIT_RATE: Decimal = dec!(0.5);

/// Round a monetary value to 2 fractional digits, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// How an order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    /// Customer collects at the shop; no delivery fee
    #[default]
    Pickup,
    /// Courier delivery; flat `DELIVERY_FEE` applies
    Delivery,
}

impl FulfillmentType {
    /// The delivery fee this fulfillment type incurs
    pub fn delivery_fee(&self) -> Decimal {
        match self {
            FulfillmentType::Pickup => Decimal::ZERO,
            FulfillmentType::Delivery => DELIVERY_FEE,
        }
    }
}

/// A selected add-on with its quantity, as priced into an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnSelection {
    pub addon: AddOn,
    pub quantity: u32,
}

impl AddOnSelection {
    pub fn new(addon: AddOn, quantity: u32) -> Self {
        Self { addon, quantity }
    }

    /// This selection's contribution to the add-ons total.
    ///
    /// PERCENTAGE modifiers are always a percentage of the base price,
    /// never of the running subtotal.
    pub fn contribution(&self, base_price: Decimal, servings: u32) -> Decimal {
        let quantity = Decimal::from(self.quantity);
        let raw = match self.addon.price_type {
            AddOnPriceType::Flat => self.addon.price_modifier * quantity,
            AddOnPriceType::Percentage => {
                base_price * self.addon.price_modifier / dec!(100) * quantity
            }
            AddOnPriceType::PerServing => {
                self.addon.price_modifier * Decimal::from(servings) * quantity
            }
        };
        round_money(raw)
    }
}

/// The derived price breakdown of a draft or persisted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// `product.base_price + product.price_per_serving * servings`
    pub base_price: Decimal,
    /// Sum of add-on contributions (order-independent)
    pub addons_total: Decimal,
    /// `base_price + addons_total`
    pub subtotal: Decimal,
    /// Discount applied before tax
    pub discount_amount: Decimal,
    /// VAT on the discounted subtotal
    pub tax_amount: Decimal,
    /// Flat fee for delivery orders, zero for pickup
    pub delivery_fee: Decimal,
    /// `subtotal - discount + tax + delivery_fee`
    pub total_amount: Decimal,
    /// Upfront payment required to confirm the order.
    ///
    /// Computed on the pre-discount subtotal while tax uses the discounted
    /// subtotal. That asymmetry is deliberate, inherited behavior; do not
    /// "fix" it without a product decision.
    pub deposit_required: Decimal,
}

impl PriceBreakdown {
    /// Remaining amount owed after `deposit_paid`
    pub fn balance_due(&self, deposit_paid: Decimal) -> Decimal {
        round_money(self.total_amount - deposit_paid)
    }
}

/// Compute the full price breakdown for a product configuration.
///
/// Pure and non-blocking; callers re-run it after every draft mutation.
pub fn calculate(
    product: &Product,
    servings: u32,
    add_ons: &[AddOnSelection],
    discount_amount: Decimal,
    fulfillment: FulfillmentType,
) -> PriceBreakdown {
    let base_price =
        round_money(product.base_price + product.price_per_serving * Decimal::from(servings));

    let addons_total = round_money(
        add_ons
            .iter()
            .map(|sel| sel.contribution(base_price, servings))
            .sum::<Decimal>(),
    );

    let subtotal = round_money(base_price + addons_total);
    let discount_amount = round_money(discount_amount);
    let tax_amount = round_money((subtotal - discount_amount) * VAT_RATE);
    let delivery_fee = fulfillment.delivery_fee();
    let total_amount = round_money(subtotal - discount_amount + tax_amount + delivery_fee);
    let deposit_required = round_money((subtotal + tax_amount + delivery_fee) * DEPOSIT_RATE);

    PriceBreakdown {
        base_price,
        addons_total,
        subtotal,
        discount_amount,
        tax_amount,
        delivery_fee,
        total_amount,
        deposit_required,
    }
}
