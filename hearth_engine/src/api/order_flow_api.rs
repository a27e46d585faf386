use std::fmt::Debug;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    api::errors::OrderFlowError,
    db_types::{Coupon, FulfillmentStatus, NewOrder, Order, OrderId, OrderItem, PaymentStatus, StatusUpdate},
    order_objects::{CheckoutRequest, OrderQueryFilter},
    pricing::{price, PricingPolicy},
    traits::StorefrontDatabase,
};

/// The result of a status update request. `changed` is `false` when the requested status was already in place, so
/// re-submitting the same update after a network retry is a harmless no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub order: Order,
    pub changed: bool,
}

/// The order flow API: checkout and the order lifecycle.
///
/// Checkout is the only path that creates orders, and it always prices the cart first — an order row with totals
/// that disagree with its items can not be produced through this API. Status updates validate against the
/// transition tables in [`db_types`](crate::db_types) before anything is written.
pub struct OrderFlowApi<B> {
    db: B,
    policy: PricingPolicy,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, policy: PricingPolicy::default() }
    }

    pub fn with_policy(db: B, policy: PricingPolicy) -> Self {
        Self { db, policy }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> OrderFlowApi<B>
where B: StorefrontDatabase
{
    /// Prices the cart and creates the order.
    ///
    /// The coupon discount is derived from the submitted items at this moment; a coupon applied earlier against a
    /// different cart state has no bearing on the stored amount. Carts that price above the order ceiling are
    /// rejected here, before any write.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Order, OrderFlowError<B>> {
        if request.customer_name.trim().is_empty() {
            return Err(OrderFlowError::MissingField("customer name"));
        }
        if request.email.trim().is_empty() {
            return Err(OrderFlowError::MissingField("email"));
        }
        if request.shipping_address.trim().is_empty() {
            return Err(OrderFlowError::MissingField("shipping address"));
        }
        // Coupons that arrived through deserialization bypass Coupon::new, so the canonical form is imposed here.
        let coupon = request.coupon.map(|mut c| {
            c.code = Coupon::normalize_code(c.code);
            c
        });
        let breakdown = price(&request.items, coupon.as_ref().map(|c| &c.discount), &self.policy)?;
        let order_id = OrderId::from(format!("HL-{:08X}", rand::random::<u32>()));
        let new_order = NewOrder {
            order_id: order_id.clone(),
            customer_name: request.customer_name,
            email: request.email,
            billing_address: request.billing_address.unwrap_or_else(|| request.shipping_address.clone()),
            shipping_address: request.shipping_address,
            subtotal: breakdown.subtotal,
            shipping_cost: breakdown.shipping_cost,
            tax: breakdown.tax,
            discount_amount: breakdown.discount_amount,
            total: breakdown.total,
            coupon_code: coupon.as_ref().map(|c| c.code.clone()),
            coupon_discount_type: coupon.as_ref().map(|c| c.discount.discount_type()),
            coupon_discount_value: coupon.as_ref().map(|c| c.discount.raw_value()),
            items: request.items,
        };
        let order = self.db.insert_order(new_order).await.map_err(OrderFlowError::DatabaseError)?;
        debug!("🛒️ Order {order_id} created for {} ({})", order.customer_name, order.total);
        Ok(order)
    }

    pub async fn order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, OrderFlowError<B>> {
        self.db.fetch_order_by_order_id(order_id).await.map_err(OrderFlowError::DatabaseError)
    }

    pub async fn order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, OrderFlowError<B>> {
        self.db.fetch_order_items(order_id).await.map_err(OrderFlowError::DatabaseError)
    }

    pub async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, OrderFlowError<B>> {
        trace!("🛒️ Searching orders: {query}");
        self.db.search_orders(query).await.map_err(OrderFlowError::DatabaseError)
    }

    /// Applies a single-field status update after validating it against the relevant transition table.
    ///
    /// Re-asserting the current status returns `changed: false` without touching the database. An invalid
    /// transition (backwards, or out of a terminal state) is rejected here; the write itself is additionally
    /// guarded on the status the order was validated against, so a concurrent admin cannot slip an invalid
    /// transition through.
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        update: StatusUpdate,
    ) -> Result<StatusChange, OrderFlowError<B>> {
        let order = self
            .db
            .fetch_order_by_order_id(order_id)
            .await
            .map_err(OrderFlowError::DatabaseError)?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))?;
        let order = match update {
            StatusUpdate::Fulfillment(next) => {
                if order.status == next {
                    debug!("🛒️ Order {order_id} fulfillment is already {next}. No action to take");
                    return Ok(StatusChange { order, changed: false });
                }
                if !order.status.can_transition_to(next) {
                    warn!("🛒️ Rejected fulfillment transition {} → {next} for order {order_id}", order.status);
                    return Err(OrderFlowError::InvalidTransition {
                        order_id: order_id.clone(),
                        from: order.status.to_string(),
                        to: next.to_string(),
                    });
                }
                self.db
                    .update_fulfillment_status(order_id, order.status, next)
                    .await
                    .map_err(OrderFlowError::DatabaseError)?
            },
            StatusUpdate::Payment(next) => {
                if order.payment_status == next {
                    debug!("🛒️ Order {order_id} payment is already {next}. No action to take");
                    return Ok(StatusChange { order, changed: false });
                }
                if !order.payment_status.can_transition_to(next) {
                    warn!("🛒️ Rejected payment transition {} → {next} for order {order_id}", order.payment_status);
                    return Err(OrderFlowError::InvalidTransition {
                        order_id: order_id.clone(),
                        from: order.payment_status.to_string(),
                        to: next.to_string(),
                    });
                }
                self.db
                    .update_payment_status(order_id, order.payment_status, next)
                    .await
                    .map_err(OrderFlowError::DatabaseError)?
            },
        };
        debug!("🛒️ Order {order_id} updated: {update}");
        Ok(StatusChange { order, changed: true })
    }

    /// The one-click "mark delivered" convenience. Requires the payment to have completed; the fulfillment change
    /// itself is the ordinary single-field update and obeys the same transition table.
    pub async fn mark_delivered(&self, order_id: &OrderId) -> Result<StatusChange, OrderFlowError<B>> {
        let order = self
            .db
            .fetch_order_by_order_id(order_id)
            .await
            .map_err(OrderFlowError::DatabaseError)?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))?;
        if order.payment_status != PaymentStatus::Completed {
            return Err(OrderFlowError::PaymentIncomplete(order_id.clone()));
        }
        self.update_status(order_id, StatusUpdate::Fulfillment(FulfillmentStatus::Delivered)).await
    }
}
