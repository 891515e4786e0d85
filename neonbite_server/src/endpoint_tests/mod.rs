mod carts;
mod catalog;
mod helpers;
mod orders;
mod reviews;
