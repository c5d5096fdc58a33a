use fog_common::Money;
use food_order_engine::traits::{PaymentProvider, ProviderError};
use gateway_tools::{GatewayApi, GatewayApiError};
use log::*;

/// Adapts the gateway REST client to the engine's [`PaymentProvider`] seam.
#[derive(Clone)]
pub struct GatewayProvider {
    api: GatewayApi,
}

impl GatewayProvider {
    pub fn new(api: GatewayApi) -> Self {
        Self { api }
    }
}

impl PaymentProvider for GatewayProvider {
    async fn request_payment(&self, order_id: i64, amount: Money) -> Result<String, ProviderError> {
        let charge = self.api.create_charge(order_id, amount).await.map_err(|e| match e {
            GatewayApiError::Timeout(m) => ProviderError::Timeout(m),
            GatewayApiError::QueryError { status, message } => {
                warn!("🔌️ Gateway rejected charge for order #{order_id}. {status}: {message}");
                ProviderError::Rejected(format!("{status}: {message}"))
            },
            other => ProviderError::Transport(other.to_string()),
        })?;
        Ok(charge.id)
    }
}
