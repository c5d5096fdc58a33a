use serde::{Deserialize, Serialize};

use crate::db_types::PaymentStatus;

/// The outcome the provider reports for a payment. The provider's vocabulary is mapped to this
/// enum at the transport boundary; anything else is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentOutcome {
    Confirmed,
    Failed,
}

impl PaymentOutcome {
    pub fn as_status(&self) -> PaymentStatus {
        match self {
            PaymentOutcome::Confirmed => PaymentStatus::Confirmed,
            PaymentOutcome::Failed => PaymentStatus::Failed,
        }
    }
}

/// An inbound webhook notification from the payment provider.
///
/// The provider is untrusted and delivers at-least-once: notifications may be duplicated, arrive
/// out of order relative to a late solicitation response, or reference identifiers we never
/// issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookNotification {
    pub provider_id: String,
    pub outcome: PaymentOutcome,
    pub order_id: i64,
}
