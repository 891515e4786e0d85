mod auth_api;
mod cart_api;
mod catalog_api;
mod order_flow_api;
mod review_api;

pub use auth_api::AuthApi;
pub use cart_api::CartApi;
pub use catalog_api::CatalogApi;
pub use order_flow_api::{CheckoutRequest, OrderFlowApi, OrderFlowError, PlacedOrder, SweepResult};
pub use review_api::ReviewApi;
