mod helpers;
pub mod op;
mod price;
mod secret;

pub use helpers::parse_boolean_flag;
pub use price::{Price, PriceConversionError};
pub use secret::Secret;
