use thiserror::Error;

use crate::{
    db_types::{FulfillmentStatus, NewOrder, Order, OrderId, OrderItem, PaymentStatus},
    order_objects::OrderQueryFilter,
};

#[derive(Debug, Clone, Error)]
pub enum StorefrontDbError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {order_id} is no longer in the {expected} state")]
    StaleStatus { order_id: OrderId, expected: String },
}

impl From<sqlx::Error> for StorefrontDbError {
    fn from(e: sqlx::Error) -> Self {
        StorefrontDbError::DatabaseError(e.to_string())
    }
}

/// Order storage and the only mutation path for order status fields.
///
/// Status updates are *guarded*: the backend applies the new value only if the order is still in the state the
/// caller validated against, in a single atomic write. A lost race surfaces as [`StorefrontDbError::StaleStatus`]
/// and leaves both status fields unchanged. Everything else about an order (items, amounts, customer fields) is
/// immutable after [`insert_order`](StorefrontDatabase::insert_order).
#[allow(async_fn_in_trait)]
pub trait StorefrontDatabase: Clone {
    type Error: std::error::Error;

    /// The URL of the backing store.
    fn url(&self) -> &str;

    /// Persists a priced order and its line-item snapshots in a single atomic transaction.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, Self::Error>;

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, Self::Error>;

    async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, Self::Error>;

    /// Fetches orders matching the filter, ordered by creation time ascending.
    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error>;

    /// Sets the fulfillment status to `to`, guarded on the current status still being `from`.
    async fn update_fulfillment_status(
        &self,
        order_id: &OrderId,
        from: FulfillmentStatus,
        to: FulfillmentStatus,
    ) -> Result<Order, Self::Error>;

    /// Sets the payment status to `to`, guarded on the current status still being `from`.
    async fn update_payment_status(
        &self,
        order_id: &OrderId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Order, Self::Error>;

    /// Closes the backing store.
    async fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
