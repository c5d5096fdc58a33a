//! # Food order server
//! The HTTP face of the food order gateway. It is responsible for:
//! Accepting new orders and serving them back to the kitchen displays.
//! Soliciting payment from the external gateway on the customer's behalf.
//! Listening for incoming webhook notifications from the payment gateway and handing them to the
//! reconciliation engine.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod integrations;
pub mod routes;
pub mod server;
pub mod validation;

#[cfg(test)]
mod endpoint_tests;
