use log::debug;

use crate::{
    db_types::{CartSnapshot, NewCartSnapshot},
    traits::{CartApiError, CartManagement},
};

/// Persistence for pre-checkout cart snapshots.
#[derive(Debug, Clone)]
pub struct CartApi<B> {
    db: B,
}

impl<B> CartApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    /// Saves a cart snapshot and returns its identifier. An empty item list is rejected; a snapshot with nothing
    /// in it can never become an order.
    pub async fn save_cart(&self, cart: NewCartSnapshot) -> Result<i64, CartApiError> {
        if cart.items.is_empty() {
            return Err(CartApiError::EmptyCart);
        }
        let id = self.db.insert_cart_snapshot(cart).await?;
        debug!("🛒️ Cart snapshot #{id} saved");
        Ok(id)
    }

    /// Returns all cart snapshots, newest first.
    pub async fn carts(&self) -> Result<Vec<CartSnapshot>, CartApiError> {
        self.db.fetch_cart_snapshots().await
    }
}
