use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewPayment, OrderStatus, Payment},
    foe_api::{
        errors::PaymentFlowError,
        payment_objects::{PaymentOutcome, WebhookNotification},
    },
    traits::{PaymentGatewayDatabase, PaymentProvider},
};

/// `PaymentFlowApi` drives payment reconciliation: soliciting a payment channel from the external
/// provider and applying the provider's asynchronous webhook outcome to the order.
pub struct PaymentFlowApi<B, P> {
    db: B,
    provider: P,
}

impl<B, P> Debug for PaymentFlowApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B, P> PaymentFlowApi<B, P> {
    pub fn new(db: B, provider: P) -> Self {
        Self { db, provider }
    }
}

impl<B, P> PaymentFlowApi<B, P>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    /// Requests a payment channel for an order.
    ///
    /// The order must exist, be in `Received` status, and carry a positive total. The payment
    /// method must exist and be enabled, and the order must not already have a pending payment.
    /// The provider call runs under a bounded timeout; if it fails, nothing is persisted.
    ///
    /// The pending-payment check here only avoids a needless provider call. The real guard is the
    /// partial unique index consulted by [`PaymentGatewayDatabase::insert_payment`], which lets
    /// exactly one of two concurrent solicitations through.
    pub async fn request_payment(&self, order_id: i64, method_id: i64) -> Result<Payment, PaymentFlowError> {
        let order = self
            .db
            .fetch_order(order_id)
            .await
            .map_err(|e| PaymentFlowError::DatabaseError(e.to_string()))?
            .ok_or(PaymentFlowError::OrderNotFound(order_id))?;
        if order.status != OrderStatus::Received {
            return Err(PaymentFlowError::OrderNotReceived(order.status));
        }
        if !order.total.is_positive() {
            return Err(PaymentFlowError::NothingToPay);
        }
        let method =
            self.db.fetch_payment_method(method_id).await?.ok_or(PaymentFlowError::MethodNotFound(method_id))?;
        if !method.enabled {
            return Err(PaymentFlowError::MethodDisabled(method.name));
        }
        if self.db.fetch_pending_payment(order_id).await?.is_some() {
            return Err(PaymentFlowError::DuplicatePaymentRequest(order_id));
        }
        let provider_id = self
            .provider
            .request_payment(order_id, order.total)
            .await
            .map_err(|e| {
                warn!("💳️ Provider call for order #{order_id} failed. Nothing was persisted. {e}");
                PaymentFlowError::ProviderError(e.to_string())
            })?;
        let payment = self
            .db
            .insert_payment(NewPayment { order_id, method_id, amount: order.total, provider_id })
            .await?;
        info!(
            "💳️ Payment request #{} ({}) registered for order #{order_id} over {}",
            payment.id, payment.provider_id, payment.amount
        );
        Ok(payment)
    }

    /// Applies a provider webhook notification.
    ///
    /// The notification is matched to a payment by provider identifier. Unknown identifiers are
    /// rejected (the provider is untrusted). A repeated notification for an already-terminal
    /// payment is a no-op success when the statuses agree, and a conflict when they do not.
    ///
    /// Confirming a pending payment also advances the owning order `Received → InPreparation`,
    /// atomically with the payment update. A failure outcome leaves the order at `Received` so
    /// payment can be solicited again.
    pub async fn handle_webhook(&self, notification: WebhookNotification) -> Result<(), PaymentFlowError> {
        let payment = self
            .db
            .fetch_payment_by_provider_id(&notification.provider_id)
            .await?
            .ok_or_else(|| {
                warn!("💳️ Webhook for unknown provider id '{}'. Ignoring", notification.provider_id);
                PaymentFlowError::PaymentNotFound(notification.provider_id.clone())
            })?;
        if payment.order_id != notification.order_id {
            return Err(PaymentFlowError::OrderMismatch(notification.provider_id, notification.order_id));
        }
        let requested = notification.outcome.as_status();
        if payment.status.is_terminal() {
            return if payment.status == requested {
                debug!(
                    "💳️ Duplicate webhook for payment #{} ({}). Already {}. No-op",
                    payment.id, payment.provider_id, payment.status
                );
                Ok(())
            } else {
                Err(PaymentFlowError::StatusMismatch { stored: payment.status, requested })
            };
        }
        match notification.outcome {
            PaymentOutcome::Confirmed => {
                let payment = self.db.confirm_payment(payment.id).await?;
                info!(
                    "💳️ Payment #{} confirmed. Order #{} moved to preparation",
                    payment.id, payment.order_id
                );
            },
            PaymentOutcome::Failed => {
                let payment = self.db.fail_payment(payment.id).await?;
                info!(
                    "💳️ Payment #{} failed. Order #{} stays Received and may be re-solicited",
                    payment.id, payment.order_id
                );
            },
        }
        Ok(())
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
