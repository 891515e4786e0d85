//! # NEONBITE server
//! This crate hosts the HTTP surface of the NEONBITE storefront. It is responsible for:
//! * Translating JSON requests into calls on the engine APIs, and engine errors into JSON error bodies.
//! * Wiring the SMTP mailer into the checkout flow as its notification collaborator.
//! * Running the background sweeper that finishes checkouts whose side effects failed.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! Every route is mounted twice: at the root and under an `/api` prefix, because deployed frontends reach the
//! server through a platform path rewrite while local ones talk to it directly. See [routes](routes/index.html).

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod mailer;
pub mod routes;
pub mod server;
pub mod sweeper;

#[cfg(test)]
mod endpoint_tests;
