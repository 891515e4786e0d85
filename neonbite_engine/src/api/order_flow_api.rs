use std::fmt::{Debug, Display};

use chrono::Duration;
use log::*;
use neonbite_common::Price;
use thiserror::Error;

use crate::{
    db_types::{FulfilmentStep, LineItem, NewOrder, Order},
    helpers::email_looks_deliverable,
    traits::{CatalogApiError, OrderApiError, OrderNotifier, StorefrontDatabase},
};

/// A checkout submission: the line items to buy, plus the optional cart snapshot to clean up and the optional
/// address to confirm to once the order exists.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub items: Vec<LineItem>,
    pub cart_id: Option<i64>,
    pub email: Option<String>,
}

/// What checkout returns to the client: the order identifier and the server-computed total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub total: Price,
}

/// Tallies for one sweep over stalled fulfilments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub examined: usize,
    pub reconciled: usize,
    pub notified: usize,
    pub completed: usize,
}

impl Display for SweepResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} stalled fulfilments examined, {} carts reconciled, {} confirmations sent, {} completed",
            self.examined, self.reconciled, self.notified, self.completed
        )
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("invalid items")]
    InvalidItems,
    #[error("Internal database error: {0}")]
    DatabaseError(String),
}

impl From<OrderApiError> for OrderFlowError {
    fn from(e: OrderApiError) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}

impl From<CatalogApiError> for OrderFlowError {
    fn from(e: CatalogApiError) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}

/// `OrderFlowApi` is the primary API for turning a submitted cart into an order, together with the side effects
/// that hang off it: deleting the originating cart snapshot and emailing the purchaser a confirmation.
///
/// The order insert is the only hard step. Once it commits, the outcome of the checkout is fixed; the side effects
/// are tracked in a per-order fulfilment record and a failed one leaves the record stalled for
/// [`Self::retry_stalled`] to pick up rather than failing the request.
pub struct OrderFlowApi<B, N> {
    db: B,
    notifier: N,
}

impl<B, N> Debug for OrderFlowApi<B, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, N> OrderFlowApi<B, N> {
    pub fn new(db: B, notifier: N) -> Self {
        Self { db, notifier }
    }
}

impl<B, N> OrderFlowApi<B, N>
where
    B: StorefrontDatabase,
    N: OrderNotifier,
{
    /// Places a new order.
    ///
    /// Items carrying a `product_id` that resolves against the catalogue are re-priced to the catalogue price; the
    /// client-submitted price is kept on the line item for audit. The total is the exact sum of the effective
    /// prices, in cents, and is fixed at the moment the order row commits.
    ///
    /// Cart cleanup and the confirmation email run after the commit and can only ever fail softly. An empty item
    /// list is the one rejection: nothing is written in that case.
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<PlacedOrder, OrderFlowError> {
        if request.items.is_empty() {
            return Err(OrderFlowError::InvalidItems);
        }
        let mut items = request.items;
        for item in &mut items {
            if let Some(product_id) = item.product_id {
                if let Some(product) = self.db.fetch_product(product_id).await? {
                    if product.price != item.price {
                        warn!(
                            "🛒️📦️ Submitted price {} for product #{product_id} differs from the catalogue price \
                             {}. The catalogue wins.",
                            item.price, product.price
                        );
                    }
                    item.catalog_price = Some(product.price);
                }
            }
        }
        let notify_email = request.email.filter(|e| email_looks_deliverable(e));
        let order = self.db.insert_order(NewOrder::new(items), request.cart_id, notify_email.clone()).await?;
        debug!("🛒️📦️ Order #{} placed for {}", order.id, order.total);
        // Notification only runs once the cart is reconciled. A failed reconciliation leaves the record at
        // `Created` for the sweeper, which re-runs both steps in order.
        if self.try_reconcile(order.id, request.cart_id).await {
            self.try_notify(&order, notify_email.as_deref()).await;
        }
        Ok(PlacedOrder { order_id: order.id, total: order.total })
    }

    /// The sweeper entry point. Loads fulfilments stuck below `Notified` for at least `older_than`, re-runs the
    /// missing steps in order, and advances whatever succeeds. Per-order failures are logged and skipped so that
    /// one broken fulfilment cannot wedge the sweep.
    pub async fn retry_stalled(&self, older_than: Duration) -> Result<SweepResult, OrderFlowError> {
        let stalled = self.db.fetch_stalled_fulfilments(older_than).await?;
        let mut result = SweepResult::default();
        for fulfilment in stalled {
            result.examined += 1;
            let mut step = fulfilment.step;
            if step == FulfilmentStep::Created {
                if !self.try_reconcile(fulfilment.order_id, fulfilment.cart_id).await {
                    continue;
                }
                step = FulfilmentStep::CartReconciled;
                result.reconciled += 1;
            }
            if step == FulfilmentStep::CartReconciled {
                let order = match self.db.fetch_order(fulfilment.order_id).await {
                    Ok(Some(order)) => order,
                    Ok(None) => {
                        error!("🧹️ Fulfilment record exists for order #{}, but the order does not", fulfilment.order_id);
                        continue;
                    },
                    Err(e) => {
                        warn!("🧹️ Could not load order #{} for its stalled fulfilment: {e}", fulfilment.order_id);
                        continue;
                    },
                };
                if self.try_notify(&order, fulfilment.notify_email.as_deref()).await {
                    if fulfilment.notify_email.is_some() {
                        result.notified += 1;
                    }
                    result.completed += 1;
                }
            }
        }
        Ok(result)
    }

    /// Deletes the originating cart snapshot, if any, and advances the fulfilment to `CartReconciled`. Returns
    /// whether the fulfilment advanced. Every failure here is soft.
    async fn try_reconcile(&self, order_id: i64, cart_id: Option<i64>) -> bool {
        if let Some(cart_id) = cart_id {
            match self.db.delete_cart_snapshot(cart_id).await {
                Ok(true) => debug!("🛒️🧹️ Cart snapshot #{cart_id} removed for order #{order_id}"),
                Ok(false) => debug!("🛒️🧹️ Cart snapshot #{cart_id} was already gone"),
                Err(e) => {
                    warn!("🛒️🧹️ Could not remove cart snapshot #{cart_id} for order #{order_id}: {e}");
                    return false;
                },
            }
        }
        match self.db.advance_fulfilment(order_id, FulfilmentStep::CartReconciled).await {
            Ok(()) => true,
            Err(e) => {
                warn!("🛒️🧹️ Could not advance fulfilment for order #{order_id}: {e}");
                false
            },
        }
    }

    /// Sends the confirmation when there is an address to send it to, then advances the fulfilment to `Notified`.
    /// Returns whether the fulfilment advanced. Every failure here is soft.
    async fn try_notify(&self, order: &Order, email: Option<&str>) -> bool {
        if let Some(email) = email {
            if let Err(e) = self.notifier.order_confirmation(email, order).await {
                warn!("🛒️✉️ Could not send the confirmation for order #{}: {e}", order.id);
                return false;
            }
            debug!("🛒️✉️ Confirmation for order #{} sent to {email}", order.id);
        }
        match self.db.advance_fulfilment(order.id, FulfilmentStep::Notified).await {
            Ok(()) => true,
            Err(e) => {
                warn!("🛒️✉️ Could not advance fulfilment for order #{}: {e}", order.id);
                false
            },
        }
    }
}
