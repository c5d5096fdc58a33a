use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderStatus},
    foe_api::{
        errors::OrderFlowError,
        order_objects::{Paginated, MAX_PAGE_SIZE},
    },
    helpers::validate_new_order,
    traits::PaymentGatewayDatabase,
};

/// `OrderFlowApi` is the primary API for the order lifecycle: creating orders, reading them back,
/// and advancing their status one step at a time.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: PaymentGatewayDatabase
{
    /// Submit a new order.
    ///
    /// The item list must be non-empty, quantities and prices positive, and the declared total
    /// must equal the computed item sum exactly. The referenced customer and every referenced
    /// product must exist. On success the order is persisted atomically with status `Received`.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        validate_new_order(&order)?;
        if !self.db.customer_exists(order.customer_id).await? {
            return Err(OrderFlowError::CustomerNotFound(order.customer_id));
        }
        for item in &order.items {
            if !self.db.product_exists(item.product_id).await? {
                return Err(OrderFlowError::ProductNotFound(item.product_id));
            }
        }
        let order = self.db.insert_order(order).await?;
        debug!("📦️ Order #{} created for customer {} with total {}", order.id, order.customer_id, order.total);
        Ok(order)
    }

    /// Advances an order one step along the lifecycle. The next status is derived from the
    /// current one; the caller never supplies a target.
    ///
    /// Only `InPreparation → Ready` and `Ready → Completed` are permitted here. A `Received`
    /// order advances solely through a confirmed payment, and a `Completed` order never advances
    /// again; both cases fail with [`OrderFlowError::InvalidStatusTransition`].
    ///
    /// The transition is an optimistic compare-and-swap on the current status, retried once
    /// locally on contention.
    pub async fn advance_status(&self, order_id: i64) -> Result<Order, OrderFlowError> {
        for attempt in 0..2 {
            let order =
                self.db.fetch_order(order_id).await?.ok_or(OrderFlowError::OrderNotFound(order_id))?;
            let next = match order.status {
                OrderStatus::InPreparation => OrderStatus::Ready,
                OrderStatus::Ready => OrderStatus::Completed,
                status => return Err(OrderFlowError::InvalidStatusTransition(status)),
            };
            match self.db.advance_order_status(order_id, order.status, next).await? {
                Some(updated) => {
                    info!("📦️ Order #{order_id} advanced {} → {}", order.status, updated.status);
                    return Ok(updated);
                },
                None => {
                    debug!("📦️ Lost a status race on order #{order_id} (attempt {attempt}). Re-reading");
                },
            }
        }
        Err(OrderFlowError::ConcurrentModification)
    }

    /// Fetches an order by id, items included.
    pub async fn fetch_order(&self, order_id: i64) -> Result<Order, OrderFlowError> {
        self.db.fetch_order(order_id).await?.ok_or(OrderFlowError::OrderNotFound(order_id))
    }

    /// Fetches a page of orders. `page` is 1-based; `limit` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn list_orders(&self, page: i64, limit: i64) -> Result<Paginated<Order>, OrderFlowError> {
        if page < 1 {
            return Err(OrderFlowError::InvalidPage);
        }
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;
        let total = self.db.count_orders().await?;
        let orders = self.db.fetch_orders(offset, limit).await?;
        trace!("📦️ Listed {} of {total} orders (page {page}, limit {limit})", orders.len());
        Ok(Paginated::new(orders, page, limit, total))
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
