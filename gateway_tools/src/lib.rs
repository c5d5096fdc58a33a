//! A thin client for the external payment gateway's REST API.
//!
//! The gateway issues a payment identifier for a charge request and later reports the outcome
//! through a webhook; only the outbound half lives here.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::GatewayApi;
pub use config::GatewayConfig;
pub use data_objects::{ChargeRequest, ChargeResponse};
pub use error::GatewayApiError;
