use crate::{
    db_types::{Order, PaymentMethod},
    foe_api::errors::{OrderFlowError, PaymentFlowError},
};

/// Read-only access to orders and the collaborator tables the order core references.
///
/// All reads are snapshot reads. They may observe a slightly stale status, but never a
/// partially-written one.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Fetches an order with its items, or `None` if it does not exist.
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError>;

    /// Fetches a page of orders (items included), ordered by creation time.
    async fn fetch_orders(&self, offset: i64, limit: i64) -> Result<Vec<Order>, OrderFlowError>;

    async fn count_orders(&self) -> Result<i64, OrderFlowError>;

    async fn customer_exists(&self, customer_id: i64) -> Result<bool, OrderFlowError>;

    async fn product_exists(&self, product_id: i64) -> Result<bool, OrderFlowError>;

    async fn fetch_payment_method(&self, method_id: i64) -> Result<Option<PaymentMethod>, PaymentFlowError>;
}
