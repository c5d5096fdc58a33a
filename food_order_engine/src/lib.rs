//! Food Order Engine
//!
//! The core library of the food order gateway. Orders are created against a catalog, walk a fixed
//! lifecycle (Received → InPreparation → Ready → Completed), and are paid through an external
//! payment provider whose outcome arrives asynchronously via a webhook.
//!
//! The library is divided into three sections:
//! 1. Database types and backend traits ([`db_types`], [`traits`]). Backends implement
//!    [`traits::PaymentGatewayDatabase`]; SQLite is the one provided here.
//! 2. The SQLite backend ([`SqliteDatabase`]). Low-level queries live in simple functions that
//!    accept a `&mut SqliteConnection`, so callers can compose them inside a single transaction
//!    where atomicity matters.
//! 3. The public API ([`OrderFlowApi`] for the order lifecycle, [`PaymentFlowApi`] for payment
//!    solicitation and webhook reconciliation). Servers should only ever talk to these two.
pub mod db_types;
pub mod foe_api;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use foe_api::{
    errors::{ErrorKind, OrderFlowError, PaymentFlowError},
    order_flow_api::OrderFlowApi,
    order_objects,
    payment_flow_api::PaymentFlowApi,
    payment_objects,
};
