//! Behaviour contracts for storefront backends.
//!
//! Each concern gets its own trait so that handlers and APIs only depend on what they use, and so that endpoint
//! tests can mock storage one concern at a time. [`StorefrontDatabase`] is the umbrella bound for the checkout
//! flow, which touches the catalogue, carts and orders in one operation.
mod data_store;
mod errors;
mod notifier;

pub use data_store::{
    CartManagement,
    CatalogManagement,
    OrderManagement,
    ReviewManagement,
    StorefrontDatabase,
    UserManagement,
};
pub use errors::{CartApiError, CatalogApiError, NotifierError, OrderApiError, ReviewApiError, UserApiError};
pub use notifier::OrderNotifier;
