use crate::{
    db_types::{NewOrder, NewPayment, Order, OrderStatus, Payment},
    foe_api::errors::{OrderFlowError, PaymentFlowError},
    traits::OrderManagement,
};

/// The highest level of behaviour a backend must provide to support the engine: persisting orders,
/// advancing the order lifecycle, and applying payment outcomes atomically.
///
/// All mutations to a single order serialize through conditional updates (compare-and-swap on the
/// expected status) and a partial unique index that admits at most one `Pending` payment per
/// order. Two different orders never block each other.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayDatabase: OrderManagement {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Persists a new order and its items in a single atomic transaction, with status `Received`.
    /// Returns the stored order, items included.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;

    /// Advances the order from `from` to `to` only if its current status is still `from`.
    /// Returns `None` when the guard fails (the order was updated concurrently); the caller
    /// decides whether to retry.
    async fn advance_order_status(
        &self,
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, OrderFlowError>;

    /// Persists a `Pending` payment for an order, re-checking inside one transaction that the
    /// order is still `Received`. The partial unique index on pending payments guarantees that of
    /// two concurrent solicitations, exactly one succeeds; the loser gets
    /// [`PaymentFlowError::DuplicatePaymentRequest`].
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentFlowError>;

    async fn fetch_payment_by_provider_id(&self, provider_id: &str) -> Result<Option<Payment>, PaymentFlowError>;

    /// Fetches the order's non-terminal payment, if any.
    async fn fetch_pending_payment(&self, order_id: i64) -> Result<Option<Payment>, PaymentFlowError>;

    /// Transitions a `Pending` payment to `Confirmed` and the owning order from `Received` to
    /// `InPreparation` in one transaction. Both succeed or neither does.
    ///
    /// A payment that lost a race and is already `Confirmed` is a no-op success; any other
    /// terminal state is a [`PaymentFlowError::StatusMismatch`].
    async fn confirm_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError>;

    /// Transitions a `Pending` payment to `Failed`. The owning order stays `Received` so the
    /// customer may solicit payment again.
    async fn fail_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), OrderFlowError> {
        Ok(())
    }
}
