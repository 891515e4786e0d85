use chrono::{DateTime, Duration, Utc};
use log::debug;
use neonbite_common::Price;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{FulfilmentStep, NewOrder, Order, OrderFulfilment},
    traits::OrderApiError,
};

/// Raw `orders` row. Line items are a denormalised JSON column; the total is integer cents.
#[derive(Debug, Clone, FromRow)]
struct OrderRow {
    id: i64,
    items: String,
    total_price: Price,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, OrderApiError> {
        let items = serde_json::from_str(&self.items).map_err(|e| OrderApiError::MalformedItems(e.to_string()))?;
        Ok(Order { id: self.id, items, total: self.total_price, status: self.status, created_at: self.created_at })
    }
}

/// Inserts a new order using the given connection. This is not atomic on its own. Embed the call inside a
/// transaction and pass `&mut *tx` as the connection argument to pair it with the fulfilment row insert.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderApiError> {
    let items = serde_json::to_string(&order.items).map_err(|e| OrderApiError::MalformedItems(e.to_string()))?;
    let row: OrderRow = sqlx::query_as(
        r#"
            INSERT INTO orders (items, total_price, status)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(items)
    .bind(order.total)
    .bind(order.status)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order inserted with id {}", row.id);
    row.into_order()
}

pub async fn fetch_order(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderApiError> {
    let row: Option<OrderRow> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    row.map(OrderRow::into_order).transpose()
}

/// Returns all orders, newest first.
pub async fn fetch_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, OrderApiError> {
    let rows: Vec<OrderRow> =
        sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC").fetch_all(conn).await?;
    rows.into_iter().map(OrderRow::into_order).collect()
}

#[derive(Debug, Clone, FromRow)]
struct FulfilmentRow {
    order_id: i64,
    step: String,
    cart_id: Option<i64>,
    notify_email: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<FulfilmentRow> for OrderFulfilment {
    fn from(row: FulfilmentRow) -> Self {
        Self {
            order_id: row.order_id,
            step: FulfilmentStep::from(row.step),
            cart_id: row.cart_id,
            notify_email: row.notify_email,
            updated_at: row.updated_at,
        }
    }
}

/// Creates the `Created` fulfilment row for a freshly inserted order.
pub async fn insert_fulfilment(
    order_id: i64,
    cart_id: Option<i64>,
    notify_email: Option<String>,
    conn: &mut SqliteConnection,
) -> Result<(), OrderApiError> {
    sqlx::query("INSERT INTO order_fulfilment (order_id, step, cart_id, notify_email) VALUES ($1, $2, $3, $4)")
        .bind(order_id)
        .bind(FulfilmentStep::Created.to_string())
        .bind(cart_id)
        .bind(notify_email)
        .execute(conn)
        .await?;
    Ok(())
}

/// Advances the fulfilment for `order_id` to `step`. The rank guard makes the transition monotonic: a concurrent
/// writer can never move a fulfilment backwards, and advancing to the current step is a no-op.
pub async fn advance_fulfilment(
    order_id: i64,
    step: FulfilmentStep,
    conn: &mut SqliteConnection,
) -> Result<(), OrderApiError> {
    sqlx::query(
        r#"
            UPDATE order_fulfilment
            SET step = $1, updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $2
              AND CASE step WHEN 'Created' THEN 0 WHEN 'CartReconciled' THEN 1 ELSE 2 END < $3
        "#,
    )
    .bind(step.to_string())
    .bind(order_id)
    .bind(step.rank())
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_fulfilment(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderFulfilment>, OrderApiError> {
    let row: Option<FulfilmentRow> = sqlx::query_as("SELECT * FROM order_fulfilment WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(OrderFulfilment::from))
}

/// Returns fulfilments stuck below `Notified` that have not been touched for at least `older_than`, oldest first.
pub async fn fetch_stalled_fulfilments(
    older_than: Duration,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderFulfilment>, OrderApiError> {
    let rows: Vec<FulfilmentRow> = sqlx::query_as(
        r#"
            SELECT * FROM order_fulfilment
            WHERE step != 'Notified'
              AND (unixepoch(CURRENT_TIMESTAMP) - unixepoch(updated_at)) >= $1
            ORDER BY updated_at ASC
        "#,
    )
    .bind(older_than.num_seconds())
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(OrderFulfilment::from).collect())
}
