use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use neonbite_common::Price;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use thiserror::Error;

//--------------------------------------       Product       ---------------------------------------------------------
/// A catalogue entry. Products are read-only from the application's perspective; the catalogue is maintained by an
/// external seed/admin process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image_url: String,
}

//--------------------------------------       LineItem       --------------------------------------------------------
/// One purchased unit inside a cart snapshot or an order: a display name and a price.
///
/// Deserialization is deliberately lenient: a missing or non-numeric price becomes zero cents rather than a
/// rejection. `catalog_price` is filled in server-side at checkout when `product_id` resolves against the
/// catalogue; the client-submitted `price` is kept alongside it for audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_price: Option<Price>,
}

impl LineItem {
    pub fn new<S: Into<String>>(name: S, price: Price) -> Self {
        Self { name: name.into(), price, product_id: None, catalog_price: None }
    }

    /// The price this item contributes to an order total: the catalogue price when the item has been re-priced,
    /// the submitted price otherwise.
    pub fn effective_price(&self) -> Price {
        self.catalog_price.unwrap_or(self.price)
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(Price::from_dollars).unwrap_or_default())
}

//--------------------------------------     CartSnapshot     --------------------------------------------------------
/// A persisted, pre-checkout list of selected line items awaiting conversion into an order. Short-lived: created
/// when the client submits its selection and deleted once the corresponding order exists.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub id: i64,
    pub user_id: Option<i64>,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCartSnapshot {
    pub user_id: Option<i64>,
    pub items: Vec<LineItem>,
}

//--------------------------------------        Order        ---------------------------------------------------------
/// A finalized record of purchased line items. Immutable once created; there is no update or cancel path.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i64,
    pub items: Vec<LineItem>,
    pub total: Price,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub const ORDER_STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub items: Vec<LineItem>,
    pub total: Price,
    pub status: String,
}

impl NewOrder {
    /// Builds a new order from its line items. The total is the exact sum of the items' effective prices, in
    /// cents. It is computed once, here, and never recomputed.
    pub fn new(items: Vec<LineItem>) -> Self {
        let total = items.iter().map(LineItem::effective_price).sum();
        Self { items, total, status: ORDER_STATUS_COMPLETED.to_string() }
    }
}

//--------------------------------------    FulfilmentStep    --------------------------------------------------------
/// The persisted checkout state machine. An order is created first; the originating cart snapshot is reconciled
/// next; the purchaser notification comes last. A fulfilment that reaches `Notified` is complete. Anything stalled
/// below that is picked up again by the sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FulfilmentStep {
    Created,
    CartReconciled,
    Notified,
}

impl FulfilmentStep {
    /// Position in the state machine, used to keep step transitions monotonic at the storage level.
    pub fn rank(&self) -> i64 {
        match self {
            FulfilmentStep::Created => 0,
            FulfilmentStep::CartReconciled => 1,
            FulfilmentStep::Notified => 2,
        }
    }
}

impl Display for FulfilmentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfilmentStep::Created => write!(f, "Created"),
            FulfilmentStep::CartReconciled => write!(f, "CartReconciled"),
            FulfilmentStep::Notified => write!(f, "Notified"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid fulfilment step: {0}")]
pub struct ConversionError(String);

impl FromStr for FulfilmentStep {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "CartReconciled" => Ok(Self::CartReconciled),
            "Notified" => Ok(Self::Notified),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl From<String> for FulfilmentStep {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid fulfilment step: {value}. But this conversion cannot fail. Defaulting to Created");
            FulfilmentStep::Created
        })
    }
}

//--------------------------------------    OrderFulfilment    -------------------------------------------------------
/// Partial-completion state of the checkout side effects, persisted alongside the order so that soft failures are
/// observable and retryable instead of silently swallowed.
#[derive(Debug, Clone)]
pub struct OrderFulfilment {
    pub order_id: i64,
    pub step: FulfilmentStep,
    pub cart_id: Option<i64>,
    pub notify_email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        Review        --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub user_name: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub user_name: String,
    pub rating: i64,
    pub comment: String,
}

//--------------------------------------         User         --------------------------------------------------------
/// A full user row, including the password hash. Never serialized; everything crossing the HTTP boundary goes
/// through [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// The projection of a user that login returns: identifier, name and email. The hash stays behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self { id: user.id, name: user.name, email: user.email }
    }
}
