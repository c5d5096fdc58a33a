use fog_common::Money;
use thiserror::Error;

/// Outbound call to the external payment provider: request a payment channel for an order amount
/// and receive the provider-issued identifier.
///
/// Implementations must enforce a bounded timeout. On timeout the engine persists nothing (fail
/// closed); retrying is an application-level policy, never the engine's.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    async fn request_payment(&self, order_id: i64, amount: Money) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("The payment provider did not respond in time: {0}")]
    Timeout(String),
    #[error("The payment provider rejected the request: {0}")]
    Rejected(String),
    #[error("Could not reach the payment provider: {0}")]
    Transport(String),
}
