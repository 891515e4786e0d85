//! `SqliteDatabase` is a concrete implementation of a storefront backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use chrono::Duration;
use log::*;
use sqlx::SqlitePool;

use super::db::{carts, db_url, new_pool, orders, products, reviews, users};
use crate::{
    db_types::{
        CartSnapshot,
        FulfilmentStep,
        NewCartSnapshot,
        NewOrder,
        NewReview,
        NewUser,
        Order,
        OrderFulfilment,
        Product,
        Review,
        User,
    },
    traits::{
        CartApiError,
        CartManagement,
        CatalogApiError,
        CatalogManagement,
        OrderApiError,
        OrderManagement,
        ReviewApiError,
        ReviewManagement,
        StorefrontDatabase,
        UserApiError,
        UserManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date, creating it from scratch on a fresh database.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🚀️ Migrations complete");
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_products(&mut conn).await
    }

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product(id, &mut conn).await
    }
}

impl CartManagement for SqliteDatabase {
    async fn insert_cart_snapshot(&self, cart: NewCartSnapshot) -> Result<i64, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::insert_cart_snapshot(cart, &mut conn).await
    }

    async fn fetch_cart_snapshots(&self) -> Result<Vec<CartSnapshot>, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::fetch_cart_snapshots(&mut conn).await
    }

    async fn delete_cart_snapshot(&self, id: i64) -> Result<bool, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::delete_cart_snapshot(id, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    /// Inserts the order row and its `Created` fulfilment row in one transaction. Either both exist afterwards, or
    /// neither does.
    async fn insert_order(
        &self,
        order: NewOrder,
        cart_id: Option<i64>,
        notify_email: Option<String>,
    ) -> Result<Order, OrderApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        orders::insert_fulfilment(order.id, cart_id, notify_email, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} saved with its fulfilment record", order.id);
        Ok(order)
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(id, &mut conn).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders(&mut conn).await
    }

    async fn advance_fulfilment(&self, order_id: i64, step: FulfilmentStep) -> Result<(), OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::advance_fulfilment(order_id, step, &mut conn).await
    }

    async fn fetch_fulfilment(&self, order_id: i64) -> Result<Option<OrderFulfilment>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_fulfilment(order_id, &mut conn).await
    }

    async fn fetch_stalled_fulfilments(&self, older_than: Duration) -> Result<Vec<OrderFulfilment>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_stalled_fulfilments(older_than, &mut conn).await
    }
}

impl ReviewManagement for SqliteDatabase {
    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        reviews::insert_review(review, &mut conn).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        reviews::fetch_reviews(&mut conn).await
    }
}

impl UserManagement for SqliteDatabase {
    async fn insert_user(&self, user: NewUser) -> Result<i64, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_email(email, &mut conn).await
    }
}

impl StorefrontDatabase for SqliteDatabase {}
