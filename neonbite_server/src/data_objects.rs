//! Request payload shapes.
//!
//! Fields the handlers validate themselves are declared optional here, so that an absent field reaches the
//! handler as `None` and comes back as a 400 with a useful message instead of a serde deserialization error.

use neonbite_engine::db_types::LineItem;
use serde::Deserialize;

/// `POST /cart` body. An absent `items` field deserializes to an empty list, which the engine rejects with the
/// same message an explicitly empty one gets.
#[derive(Debug, Clone, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// `POST /orders` body. `items` is kept as a raw JSON value so that an absent or non-array value can be rejected
/// with the exact "invalid items" message the frontend looks for.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutPayload {
    #[serde(default)]
    pub items: Option<serde_json::Value>,
    #[serde(default, rename = "carritoId")]
    pub carrito_id: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// `POST /reviews` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPayload {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// `POST /users/signup` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `POST /users/login` body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
