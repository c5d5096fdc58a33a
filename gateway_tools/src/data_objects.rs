use fog_common::Money;
use serde::{Deserialize, Serialize};

/// Outbound charge request. `reference` is our order id, echoed back by the gateway in the
/// webhook so notifications can be matched to orders.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub reference: i64,
    pub amount: Money,
}

/// The gateway's answer to a charge request. `id` is the provider-issued payment identifier that
/// every later webhook carries.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeResponse {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}
