use log::*;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{FulfillmentStatus, NewOrder, Order, OrderId, OrderItem, PaymentStatus},
    order_objects::OrderQueryFilter,
    traits::StorefrontDbError,
};

/// Inserts a new order and its line items using the given connection. This is not atomic on its own. Callers wrap
/// this in a transaction and pass `&mut *tx` as the connection argument.
///
/// Both status columns start at their schema defaults (`Pending`).
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, StorefrontDbError> {
    let items = order.items;
    let inserted: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                order_id,
                customer_name,
                email,
                shipping_address,
                billing_address,
                subtotal,
                shipping_cost,
                tax,
                discount_amount,
                total,
                coupon_code,
                coupon_discount_type,
                coupon_discount_value
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(order.customer_name)
    .bind(order.email)
    .bind(order.shipping_address)
    .bind(order.billing_address)
    .bind(order.subtotal)
    .bind(order.shipping_cost)
    .bind(order.tax)
    .bind(order.discount_amount)
    .bind(order.total)
    .bind(order.coupon_code)
    .bind(order.coupon_discount_type)
    .bind(order.coupon_discount_value)
    .fetch_one(&mut *conn)
    .await?;
    for item in items {
        let line_total = item.line_total();
        sqlx::query(
            r#"
                INSERT INTO order_items (order_id, product_name, sku, unit_price, quantity, line_total)
                VALUES ($1, $2, $3, $4, $5, $6);
            "#,
        )
        .bind(inserted.id)
        .bind(item.product_name)
        .bind(item.sku)
        .bind(item.unit_price)
        .bind(item.quantity)
        .bind(line_total)
        .execute(&mut *conn)
        .await?;
    }
    debug!("📝️ Order [{}] inserted with id {}", inserted.order_id, inserted.id);
    Ok(inserted)
}

pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Returns the line-item snapshots for the order, in insertion order.
pub async fn fetch_order_items(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    let items = sqlx::query_as(
        r#"
            SELECT order_items.id as id,
                   orders.order_id as order_id,
                   product_name,
                   sku,
                   unit_price,
                   quantity,
                   line_total
            FROM order_items JOIN orders ON order_items.order_id = orders.id
            WHERE orders.order_id = $1
            ORDER BY order_items.id ASC;
        "#,
    )
    .bind(order_id.as_str())
    .fetch_all(conn)
    .await?;
    Ok(items)
}

/// Fetches orders according to criteria specified in the `OrderQueryFilter`
///
/// Resulting orders are ordered by `created_at` in ascending order
pub async fn search_orders(query: OrderQueryFilter, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let mut builder = QueryBuilder::new(
        r#"
    SELECT * FROM orders
    "#,
    );
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(email) = query.email {
        where_clause.push("email LIKE ");
        where_clause.push_bind_unseparated(format!("%{email}%"));
    }
    if query.status.as_ref().map(|s| !s.is_empty()).unwrap_or(false) {
        let mut statuses = vec![];
        query.status.as_ref().unwrap().iter().for_each(|s| {
            statuses.push(format!("'{s}'"));
        });
        let status_clause = statuses.join(",");
        where_clause.push(format!("status IN ({status_clause})"));
    }
    if query.payment_status.as_ref().map(|s| !s.is_empty()).unwrap_or(false) {
        let mut statuses = vec![];
        query.payment_status.as_ref().unwrap().iter().for_each(|s| {
            statuses.push(format!("'{s}'"));
        });
        let status_clause = statuses.join(",");
        where_clause.push(format!("payment_status IN ({status_clause})"));
    }
    if let Some(since) = query.since {
        where_clause.push("created_at >= ");
        where_clause.push_bind_unseparated(since);
    }
    if let Some(until) = query.until {
        where_clause.push("created_at <= ");
        where_clause.push_bind_unseparated(until);
    }
    builder.push(" ORDER BY created_at ASC");

    trace!("📝️ Executing query: {}", builder.sql());
    let query = builder.build_query_as::<Order>();
    let orders = query.fetch_all(conn).await?;
    trace!("📝️ Result of search_orders: {:?}", orders.len());
    Ok(orders)
}

/// Sets the fulfillment status, guarded on the row still holding the status the caller validated against. A `None`
/// from the guarded write is disambiguated with a follow-up fetch: missing row or lost race.
pub async fn update_fulfillment_status(
    order_id: &OrderId,
    from: FulfillmentStatus,
    to: FulfillmentStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, StorefrontDbError> {
    let result: Option<Order> = sqlx::query_as(
        "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2 AND status = $3 RETURNING *",
    )
    .bind(to.to_string())
    .bind(order_id.as_str())
    .bind(from.to_string())
    .fetch_optional(&mut *conn)
    .await?;
    match result {
        Some(order) => Ok(order),
        None => match fetch_order_by_order_id(order_id, conn).await? {
            Some(_) => Err(StorefrontDbError::StaleStatus { order_id: order_id.clone(), expected: from.to_string() }),
            None => Err(StorefrontDbError::OrderNotFound(order_id.clone())),
        },
    }
}

/// The payment analogue of [`update_fulfillment_status`].
pub async fn update_payment_status(
    order_id: &OrderId,
    from: PaymentStatus,
    to: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, StorefrontDbError> {
    let result: Option<Order> = sqlx::query_as(
        "UPDATE orders SET payment_status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2 AND \
         payment_status = $3 RETURNING *",
    )
    .bind(to.to_string())
    .bind(order_id.as_str())
    .bind(from.to_string())
    .fetch_optional(&mut *conn)
    .await?;
    match result {
        Some(order) => Ok(order),
        None => match fetch_order_by_order_id(order_id, conn).await? {
            Some(_) => Err(StorefrontDbError::StaleStatus { order_id: order_id.clone(), expected: from.to_string() }),
            None => Err(StorefrontDbError::OrderNotFound(order_id.clone())),
        },
    }
}
