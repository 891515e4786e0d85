use crate::{db_types::Order, traits::NotifierError};

/// Outbound notification seam for the order flow. The production implementation sends SMTP email; tests plug in
/// recording fakes. Delivery is best-effort: the checkout flow logs failures and moves on.
#[allow(async_fn_in_trait)]
pub trait OrderNotifier: Clone {
    /// Sends an order confirmation to `to`. The message carries the order identifier and the formatted total.
    async fn order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifierError>;
}
