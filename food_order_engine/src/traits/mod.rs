//! Behaviour that database backends and provider clients must implement to support the engine.
mod order_management;
mod payment_gateway_database;
mod payment_provider;

pub use order_management::OrderManagement;
pub use payment_gateway_database::PaymentGatewayDatabase;
pub use payment_provider::{PaymentProvider, ProviderError};
