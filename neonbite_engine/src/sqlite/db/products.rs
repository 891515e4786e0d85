use sqlx::SqliteConnection;

use crate::{db_types::Product, traits::CatalogApiError};

/// Returns the catalogue projection, ordered by identifier.
pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, CatalogApiError> {
    let products = sqlx::query_as("SELECT id, name, price, description, image_url FROM products ORDER BY id")
        .fetch_all(conn)
        .await?;
    Ok(products)
}

pub async fn fetch_product(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, CatalogApiError> {
    let product = sqlx::query_as("SELECT id, name, price, description, image_url FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}
