use chrono::Duration;

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
    traits::{CartApiError, CatalogApiError, OrderApiError, ReviewApiError, UserApiError},
};

#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Returns the full product catalogue.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError>;

    /// Returns a single product, or `None` if the identifier does not resolve.
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;
}

#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Persists a cart snapshot and returns its new identifier.
    async fn insert_cart_snapshot(&self, cart: NewCartSnapshot) -> Result<i64, CartApiError>;

    /// Returns all cart snapshots, newest first.
    async fn fetch_cart_snapshots(&self) -> Result<Vec<CartSnapshot>, CartApiError>;

    /// Deletes the snapshot with the given identifier. Returns `true` if a row was actually removed. Deleting a
    /// snapshot that is already gone is not an error.
    async fn delete_cart_snapshot(&self, id: i64) -> Result<bool, CartApiError>;
}

#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// In a single atomic transaction, inserts the order row and its `Created` fulfilment row. The fulfilment row
    /// records the cart to reconcile and the address to notify so that a sweeper can finish the job if this
    /// process dies before the soft steps run.
    async fn insert_order(
        &self,
        order: NewOrder,
        cart_id: Option<i64>,
        notify_email: Option<String>,
    ) -> Result<Order, OrderApiError>;

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderApiError>;

    /// Returns all orders, newest first.
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderApiError>;

    /// Moves an order's fulfilment to the given step. Transitions are monotonic: a concurrent update can never
    /// move a fulfilment backwards.
    async fn advance_fulfilment(&self, order_id: i64, step: FulfilmentStep) -> Result<(), OrderApiError>;

    async fn fetch_fulfilment(&self, order_id: i64) -> Result<Option<OrderFulfilment>, OrderApiError>;

    /// Returns fulfilments that are stuck below `Notified` and have not been touched for at least `older_than`.
    async fn fetch_stalled_fulfilments(&self, older_than: Duration) -> Result<Vec<OrderFulfilment>, OrderApiError>;
}

#[allow(async_fn_in_trait)]
pub trait ReviewManagement {
    /// Persists a review and returns the stored row, including its server-assigned identifier and timestamp.
    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewApiError>;

    /// Returns all reviews, newest first.
    async fn fetch_reviews(&self) -> Result<Vec<Review>, ReviewApiError>;
}

#[allow(async_fn_in_trait)]
pub trait UserManagement {
    /// Inserts a new account. Email uniqueness is enforced by the storage layer at the point of commit; a
    /// uniqueness violation surfaces as [`UserApiError::EmailTaken`]. There is deliberately no
    /// lookup-before-insert.
    async fn insert_user(&self, user: NewUser) -> Result<i64, UserApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError>;
}

/// The umbrella bound for backends supporting the checkout flow.
pub trait StorefrontDatabase: Clone + CatalogManagement + CartManagement + OrderManagement {}
