//! The public API of the engine. Servers talk to [`order_flow_api::OrderFlowApi`] and
//! [`payment_flow_api::PaymentFlowApi`] and never to the database directly.
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod payment_flow_api;
pub mod payment_objects;
