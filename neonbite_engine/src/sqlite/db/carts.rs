use chrono::{DateTime, Utc};
use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{CartSnapshot, NewCartSnapshot},
    traits::CartApiError,
};

/// Raw `carrito` row. Line items live in a JSON column and are decoded on the way out.
#[derive(Debug, Clone, FromRow)]
struct CartRow {
    id: i64,
    user_id: Option<i64>,
    items: String,
    created_at: DateTime<Utc>,
}

impl CartRow {
    fn into_snapshot(self) -> Result<CartSnapshot, CartApiError> {
        let items = serde_json::from_str(&self.items).map_err(|e| CartApiError::MalformedItems(e.to_string()))?;
        Ok(CartSnapshot { id: self.id, user_id: self.user_id, items, created_at: self.created_at })
    }
}

pub async fn insert_cart_snapshot(cart: NewCartSnapshot, conn: &mut SqliteConnection) -> Result<i64, CartApiError> {
    let items = serde_json::to_string(&cart.items).map_err(|e| CartApiError::MalformedItems(e.to_string()))?;
    let (id,): (i64,) = sqlx::query_as("INSERT INTO carrito (user_id, items) VALUES ($1, $2) RETURNING id")
        .bind(cart.user_id)
        .bind(items)
        .fetch_one(conn)
        .await?;
    debug!("🛒️ Cart snapshot inserted with id {id}");
    Ok(id)
}

/// Returns all cart snapshots, newest first.
pub async fn fetch_cart_snapshots(conn: &mut SqliteConnection) -> Result<Vec<CartSnapshot>, CartApiError> {
    let rows: Vec<CartRow> =
        sqlx::query_as("SELECT * FROM carrito ORDER BY created_at DESC, id DESC").fetch_all(conn).await?;
    rows.into_iter().map(CartRow::into_snapshot).collect()
}

/// Deletes the snapshot with the given id, returning whether a row was removed.
pub async fn delete_cart_snapshot(id: i64, conn: &mut SqliteConnection) -> Result<bool, CartApiError> {
    let result = sqlx::query("DELETE FROM carrito WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
