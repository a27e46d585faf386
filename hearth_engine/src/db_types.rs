use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use hearth_common::Cents;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        OrderId        -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(String);

//--------------------------------------   FulfillmentStatus   -------------------------------------------------------
/// The fulfillment half of the dual order state machine.
///
/// Forward transitions (including skips, e.g. `Pending` straight to `Delivered` via the one-click flow) are
/// permitted; backward transitions are not. `Delivered` and `Cancelled` are terminal. `Cancelled` is reachable from
/// every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum FulfillmentStatus {
    /// The order has been created and no fulfillment work has started.
    Pending,
    /// The order is being prepared for shipment.
    Processing,
    /// The order has left the warehouse.
    Shipped,
    /// The order has been received by the customer. Terminal.
    Delivered,
    /// The order was cancelled before delivery. Terminal.
    Cancelled,
}

impl FulfillmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FulfillmentStatus::Delivered | FulfillmentStatus::Cancelled)
    }

    /// Returns true if the transition `self` → `next` is permitted by the fulfillment state table.
    ///
    /// Re-asserting the current status is not a transition; it is treated as a no-op by the order flow API and
    /// returns `false` here.
    pub fn can_transition_to(&self, next: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;
        matches!(
            (*self, next),
            (Pending, Processing) |
                (Pending, Shipped) |
                (Pending, Delivered) |
                (Pending, Cancelled) |
                (Processing, Shipped) |
                (Processing, Delivered) |
                (Processing, Cancelled) |
                (Shipped, Delivered) |
                (Shipped, Cancelled)
        )
    }
}

impl Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentStatus::Pending => write!(f, "Pending"),
            FulfillmentStatus::Processing => write!(f, "Processing"),
            FulfillmentStatus::Shipped => write!(f, "Shipped"),
            FulfillmentStatus::Delivered => write!(f, "Delivered"),
            FulfillmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for FulfillmentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid fulfillment status: {s}"))),
        }
    }
}

impl From<String> for FulfillmentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid fulfillment status: {value}. But this conversion cannot fail. Defaulting to Pending");
            FulfillmentStatus::Pending
        })
    }
}

//--------------------------------------     PaymentStatus     -------------------------------------------------------
/// The payment half of the dual order state machine.
///
/// `Pending` may move to `Completed` or `Failed`; `Completed` may move to `Refunded`. `Failed` and `Refunded` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Failed | PaymentStatus::Refunded)
    }

    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((*self, next), (Pending, Completed) | (Pending, Failed) | (Completed, Refunded))
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Completed => write!(f, "Completed"),
            PaymentStatus::Failed => write!(f, "Failed"),
            PaymentStatus::Refunded => write!(f, "Refunded"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            "Refunded" => Ok(Self::Refunded),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to Pending");
            PaymentStatus::Pending
        })
    }
}

//--------------------------------------     StatusUpdate      -------------------------------------------------------
/// A single-field status update request. Each order status change touches exactly one of the two state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusUpdate {
    Fulfillment(FulfillmentStatus),
    Payment(PaymentStatus),
}

impl Display for StatusUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusUpdate::Fulfillment(s) => write!(f, "fulfillment → {s}"),
            StatusUpdate::Payment(s) => write!(f, "payment → {s}"),
        }
    }
}

//--------------------------------------     DiscountType      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "Percentage"),
            DiscountType::Fixed => write!(f, "Fixed"),
        }
    }
}

impl FromStr for DiscountType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Percentage" => Ok(Self::Percentage),
            "Fixed" => Ok(Self::Fixed),
            s => Err(ConversionError(format!("Invalid discount type: {s}"))),
        }
    }
}

//--------------------------------------    CouponDiscount     -------------------------------------------------------
/// The discount rule carried by a coupon. A coupon is a function of the *current* subtotal; the resulting amount is
/// always re-derived, never cached. See [`CouponDiscount::amount_for`] in the pricing module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponDiscount {
    /// A whole-number percentage of the cart subtotal.
    Percentage(i64),
    /// A fixed amount, capped at the cart subtotal.
    Fixed(Cents),
}

impl CouponDiscount {
    pub fn discount_type(&self) -> DiscountType {
        match self {
            CouponDiscount::Percentage(_) => DiscountType::Percentage,
            CouponDiscount::Fixed(_) => DiscountType::Fixed,
        }
    }

    /// The raw value as stored in the order's `coupon_discount_value` column: percent for percentage coupons, cents
    /// for fixed coupons.
    pub fn raw_value(&self) -> i64 {
        match self {
            CouponDiscount::Percentage(pct) => *pct,
            CouponDiscount::Fixed(amount) => amount.value(),
        }
    }

    pub fn from_parts(discount_type: DiscountType, value: i64) -> Self {
        match discount_type {
            DiscountType::Percentage => CouponDiscount::Percentage(value),
            DiscountType::Fixed => CouponDiscount::Fixed(Cents::new(value)),
        }
    }
}

//--------------------------------------        Coupon         -------------------------------------------------------
/// A named discount rule, looked up server-side at checkout. Stateless from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount: CouponDiscount,
}

impl Coupon {
    pub fn new<S: Into<String>>(code: S, discount: CouponDiscount) -> Self {
        Self { code: Self::normalize_code(code), discount }
    }

    /// Coupon codes are case-insensitive; the canonical form is uppercase.
    pub fn normalize_code<S: Into<String>>(code: S) -> String {
        code.into().trim().to_uppercase()
    }
}

//--------------------------------------        Order          -------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub subtotal: Cents,
    pub shipping_cost: Cents,
    pub tax: Cents,
    pub discount_amount: Cents,
    pub total: Cents,
    pub coupon_code: Option<String>,
    pub coupon_discount_type: Option<DiscountType>,
    pub coupon_discount_value: Option<i64>,
    pub status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      OrderItem        -------------------------------------------------------
/// A product snapshot taken at checkout time. Immutable after order creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub product_name: String,
    pub sku: String,
    pub unit_price: Cents,
    pub quantity: i64,
    pub line_total: Cents,
}

//--------------------------------------       NewOrder        -------------------------------------------------------
/// The insert payload for a priced order. Built by the order flow API from a checkout request and a
/// [`PriceBreakdown`](crate::pricing::PriceBreakdown); never constructed from unchecked totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub subtotal: Cents,
    pub shipping_cost: Cents,
    pub tax: Cents,
    pub discount_amount: Cents,
    pub total: Cents,
    pub coupon_code: Option<String>,
    pub coupon_discount_type: Option<DiscountType>,
    pub coupon_discount_value: Option<i64>,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_name: String,
    pub sku: String,
    pub unit_price: Cents,
    pub quantity: i64,
}

impl NewOrderItem {
    pub fn new<S: Into<String>>(product_name: S, sku: S, unit_price: Cents, quantity: i64) -> Self {
        Self { product_name: product_name.into(), sku: sku.into(), unit_price, quantity }
    }

    pub fn line_total(&self) -> Cents {
        self.unit_price * self.quantity
    }
}

//--------------------------------------        Donor          -------------------------------------------------------
/// A corporate donor. Totals are never stored on this record; they are re-derived from the donor's
/// [`ProductDonation`]s on every read.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonor {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
}

//--------------------------------------    ProductDonation    -------------------------------------------------------
/// A single product donation. "Matched" is not a stored flag; it is derived from the presence of a fire department
/// reference, so the two can never drift apart.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductDonation {
    pub id: i64,
    pub donor_id: i64,
    pub product_name: String,
    pub unit_value: Cents,
    pub quantity: i64,
    pub fire_department_id: Option<i64>,
    pub donation_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductDonation {
    pub fn matched(&self) -> bool {
        self.fire_department_id.is_some()
    }

    pub fn total_value(&self) -> Cents {
        self.unit_value * self.quantity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor: NewDonor,
    pub product_name: String,
    pub unit_value: Cents,
    pub quantity: i64,
    pub fire_department_id: Option<i64>,
    pub donation_date: DateTime<Utc>,
}

//--------------------------------------    FireDepartment     -------------------------------------------------------
/// Referenced, never owned, by [`ProductDonation`]. Deleting a department leaves dangling references behind;
/// every view that reports matched-ness checks the reference against the live department set and treats a dangling
/// id as unmatched.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FireDepartment {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub county: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFireDepartment {
    pub name: String,
    pub city: String,
    pub county: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

//--------------------------------------      AdminUser        -------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdminUser {
    pub user_id: i64,
    pub email: String,
    pub is_superadmin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub email: String,
    pub password: hearth_common::Secret<String>,
}

impl NewAdminUser {
    pub fn new<S: Into<String>>(email: S, password: S) -> Self {
        Self { email: email.into(), password: hearth_common::Secret::new(password.into()) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fulfillment_transitions() {
        use FulfillmentStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        // forward skips are allowed
        assert!(Pending.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Delivered));
        // cancellation from any non-terminal state
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
        // backward and out-of-terminal moves are rejected
        assert!(!Delivered.can_transition_to(Processing));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
        // self-transitions are not transitions
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn payment_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(Completed.can_transition_to(Refunded));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Refunded.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Refunded));
    }

    #[test]
    fn status_round_trips() {
        for s in ["Pending", "Processing", "Shipped", "Delivered", "Cancelled"] {
            assert_eq!(s.parse::<FulfillmentStatus>().unwrap().to_string(), s);
        }
        for s in ["Pending", "Completed", "Failed", "Refunded"] {
            assert_eq!(s.parse::<PaymentStatus>().unwrap().to_string(), s);
        }
        assert!("Delivred".parse::<FulfillmentStatus>().is_err());
    }

    #[test]
    fn coupon_codes_normalize_to_uppercase() {
        let coupon = Coupon::new(" fixed10 ", CouponDiscount::Fixed(Cents::from_dollars(10)));
        assert_eq!(coupon.code, "FIXED10");
    }

    #[test]
    fn coupon_discount_parts_round_trip() {
        let fixed = CouponDiscount::Fixed(Cents::new(1_000));
        assert_eq!(CouponDiscount::from_parts(fixed.discount_type(), fixed.raw_value()), fixed);
        let pct = CouponDiscount::Percentage(15);
        assert_eq!(CouponDiscount::from_parts(pct.discount_type(), pct.raw_value()), pct);
    }
}
