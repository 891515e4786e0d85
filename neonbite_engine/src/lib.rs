//! NEONBITE storefront engine
//!
//! This library contains the storefront's core logic, independent of the HTTP layer. It is divided into:
//! 1. Database management ([`mod@sqlite`]). SQLite is the supported backend. Handlers should never touch the
//!    database directly; they go through the public APIs. The exception is the data types used in the database,
//!    which are defined in [`mod@db_types`] and are public.
//! 2. The engine's public API surface: [`OrderFlowApi`] orchestrates the checkout sequence (order creation, cart
//!    reconciliation, purchaser notification) and the fulfilment retry sweep. [`CatalogApi`], [`CartApi`],
//!    [`ReviewApi`] and [`AuthApi`] are thin, validated passthroughs to the storage traits.
//!
//! Backends implement the traits in [`mod@traits`]. Outbound notifications go through the
//! [`traits::OrderNotifier`] seam so that delivery is pluggable (SMTP in production, recording fakes in tests).
pub mod db_types;
pub mod helpers;
pub mod traits;

mod api;
mod sqlite;

pub use api::{
    AuthApi,
    CartApi,
    CatalogApi,
    CheckoutRequest,
    OrderFlowApi,
    OrderFlowError,
    PlacedOrder,
    ReviewApi,
    SweepResult,
};
pub use sqlite::{db_url, new_pool, SqliteDatabase};
