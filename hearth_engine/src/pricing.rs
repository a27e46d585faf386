//! The order pricing engine.
//!
//! Computes subtotal, discount, shipping, tax and total for a cart, entirely in integer cents. Shipping and tax are
//! policy constants carried by [`PricingPolicy`] rather than hardcoded values, and the grand total is checked against
//! the hard order ceiling *before* any order is created.

use hearth_common::Cents;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db_types::{CouponDiscount, NewOrderItem};

/// The largest total the store accepts. Checkout fails fast when a cart prices above this; the amount is never
/// silently truncated.
pub const MAX_ORDER_TOTAL: Cents = Cents::new(99_999_999);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Cannot price an empty cart")]
    EmptyCart,
    #[error("Invalid quantity {quantity} for {product}")]
    InvalidQuantity { product: String, quantity: i64 },
    #[error("Order total {0} exceeds the maximum allowed total of {MAX_ORDER_TOTAL}")]
    TotalExceedsCeiling(Cents),
}

/// Store-level pricing constants. Both are currently zero, but they are injected rather than assumed so that a
/// shipping table or tax rule can be introduced without touching the pricing pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub shipping_cost: Cents,
    pub tax: Cents,
}

/// The full financial breakdown of a cart. Satisfies `total == subtotal - discount_amount + shipping_cost + tax`
/// (clamped at zero) by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Cents,
    pub discount_amount: Cents,
    pub shipping_cost: Cents,
    pub tax: Cents,
    pub total: Cents,
}

impl CouponDiscount {
    /// Evaluates this coupon against the *current* cart subtotal.
    ///
    /// Percentage coupons take their share of the subtotal, rounded half-up at the cent. Fixed coupons are capped at
    /// the subtotal. The result is never negative and never exceeds the subtotal, so an order total can not be
    /// discounted below zero.
    pub fn amount_for(&self, subtotal: Cents) -> Cents {
        let amount = match self {
            CouponDiscount::Percentage(pct) => subtotal.percent(*pct),
            CouponDiscount::Fixed(value) => *value,
        };
        amount.min(subtotal).or_zero()
    }
}

/// Prices a cart. This is the only path to an order's financial fields; checkout rejects the cart here before
/// anything is written.
pub fn price(
    items: &[NewOrderItem],
    coupon: Option<&CouponDiscount>,
    policy: &PricingPolicy,
) -> Result<PriceBreakdown, PricingError> {
    if items.is_empty() {
        return Err(PricingError::EmptyCart);
    }
    if let Some(item) = items.iter().find(|i| i.quantity <= 0) {
        return Err(PricingError::InvalidQuantity { product: item.product_name.clone(), quantity: item.quantity });
    }
    let subtotal: Cents = items.iter().map(NewOrderItem::line_total).sum();
    let discount_amount = coupon.map(|c| c.amount_for(subtotal)).unwrap_or_default();
    let total = (subtotal - discount_amount + policy.shipping_cost + policy.tax).or_zero();
    if total > MAX_ORDER_TOTAL {
        return Err(PricingError::TotalExceedsCeiling(total));
    }
    Ok(PriceBreakdown { subtotal, discount_amount, shipping_cost: policy.shipping_cost, tax: policy.tax, total })
}
