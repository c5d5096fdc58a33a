//! `SqliteDatabase` is the concrete SQLite backend for the food order engine. It implements the
//! traits in the [`crate::traits`] module on top of the low-level functions in [`super::db`].
use std::fmt::Debug;

use fog_common::Money;
use log::*;
use sqlx::SqlitePool;

use super::db::{catalog, new_pool, orders, payments};
use crate::{
    db_types::{NewOrder, NewPayment, Order, OrderStatus, Payment, PaymentMethod, PaymentStatus},
    foe_api::errors::{OrderFlowError, PaymentFlowError},
    traits::{OrderManagement, PaymentGatewayDatabase},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the embedded schema migrations. Run once at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    // Seed helpers for the collaborator tables. Fixtures and demo data only; there is no CRUD
    // surface for these entities here.
    pub async fn insert_customer(&self, name: &str, cpf: &str) -> Result<i64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        catalog::insert_customer(name, cpf, &mut conn).await
    }

    pub async fn insert_product(&self, name: &str, unit_price: Money) -> Result<i64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        catalog::insert_product(name, unit_price, &mut conn).await
    }

    pub async fn insert_payment_method(&self, name: &str, enabled: bool) -> Result<i64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        catalog::insert_payment_method(name, enabled, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_by_id(order_id, &mut conn).await?)
    }

    async fn fetch_orders(&self, offset: i64, limit: i64) -> Result<Vec<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders(offset, limit, &mut conn).await?)
    }

    async fn count_orders(&self) -> Result<i64, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::count_orders(&mut conn).await?)
    }

    async fn customer_exists(&self, customer_id: i64) -> Result<bool, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(catalog::customer_exists(customer_id, &mut conn).await?)
    }

    async fn product_exists(&self, product_id: i64) -> Result<bool, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(catalog::product_exists(product_id, &mut conn).await?)
    }

    async fn fetch_payment_method(&self, method_id: i64) -> Result<Option<PaymentMethod>, PaymentFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(catalog::fetch_payment_method(method_id, &mut conn).await?)
    }
}

impl PaymentGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} saved with status {}", order.id, order.status);
        Ok(order)
    }

    async fn advance_order_status(
        &self,
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status_cas(order_id, from, to, &mut conn).await
    }

    /// Re-checks the solicitation preconditions and inserts the payment in one transaction.
    /// The partial unique index on pending payments is what makes concurrent solicitations safe.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentFlowError> {
        let mut tx = self.pool.begin().await.map_err(PaymentFlowError::from)?;
        let order = orders::fetch_order_by_id(payment.order_id, &mut tx)
            .await
            .map_err(PaymentFlowError::from)?
            .ok_or(PaymentFlowError::OrderNotFound(payment.order_id))?;
        if order.status != OrderStatus::Received {
            return Err(PaymentFlowError::OrderNotReceived(order.status));
        }
        let payment = payments::insert_payment(payment, &mut tx).await?;
        tx.commit().await.map_err(PaymentFlowError::from)?;
        debug!("🗃️ Payment #{} ({}) is now pending for order #{}", payment.id, payment.provider_id, payment.order_id);
        Ok(payment)
    }

    async fn fetch_payment_by_provider_id(&self, provider_id: &str) -> Result<Option<Payment>, PaymentFlowError> {
        let mut conn = self.pool.acquire().await.map_err(PaymentFlowError::from)?;
        Ok(payments::fetch_payment_by_provider_id(provider_id, &mut conn).await?)
    }

    async fn fetch_pending_payment(&self, order_id: i64) -> Result<Option<Payment>, PaymentFlowError> {
        let mut conn = self.pool.acquire().await.map_err(PaymentFlowError::from)?;
        Ok(payments::fetch_pending_payment(order_id, &mut conn).await?)
    }

    /// Confirms a pending payment and advances the owning order `Received → InPreparation`
    /// atomically. A partial application would leave a confirmed payment on a Received order,
    /// so any failure rolls the whole transaction back.
    async fn confirm_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError> {
        let mut tx = self.pool.begin().await.map_err(PaymentFlowError::from)?;
        let updated =
            payments::update_payment_status_cas(payment_id, PaymentStatus::Pending, PaymentStatus::Confirmed, &mut tx)
                .await?;
        let payment = match updated {
            Some(payment) => payment,
            // Another delivery of the same notification got here first.
            None => return resolve_lost_race(payment_id, PaymentStatus::Confirmed, tx).await,
        };
        let order = orders::update_order_status_cas(
            payment.order_id,
            OrderStatus::Received,
            OrderStatus::InPreparation,
            &mut tx,
        )
        .await
        .map_err(|e| PaymentFlowError::DatabaseError(e.to_string()))?;
        if order.is_none() {
            // Dropping the transaction rolls the payment update back.
            let status = orders::fetch_order_by_id(payment.order_id, &mut tx)
                .await
                .map_err(PaymentFlowError::from)?
                .map(|o| o.status)
                .ok_or(PaymentFlowError::OrderNotFound(payment.order_id))?;
            error!(
                "🗃️ Payment #{payment_id} is pending but order #{} is {status}. Refusing to confirm",
                payment.order_id
            );
            return Err(PaymentFlowError::OrderNotReceived(status));
        }
        tx.commit().await.map_err(PaymentFlowError::from)?;
        debug!("🗃️ Payment #{payment_id} confirmed; order #{} moved to preparation", payment.order_id);
        Ok(payment)
    }

    async fn fail_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError> {
        let mut tx = self.pool.begin().await.map_err(PaymentFlowError::from)?;
        let updated =
            payments::update_payment_status_cas(payment_id, PaymentStatus::Pending, PaymentStatus::Failed, &mut tx)
                .await?;
        let payment = match updated {
            Some(payment) => payment,
            None => return resolve_lost_race(payment_id, PaymentStatus::Failed, tx).await,
        };
        tx.commit().await.map_err(PaymentFlowError::from)?;
        debug!("🗃️ Payment #{payment_id} marked as failed; order #{} stays Received", payment.order_id);
        Ok(payment)
    }
}

/// Decides the outcome of a payment CAS that found no `Pending` row: a duplicate delivery that
/// already applied the same terminal status is an idempotent success, anything else is a
/// conflict.
async fn resolve_lost_race(
    payment_id: i64,
    requested: PaymentStatus,
    mut tx: sqlx::Transaction<'_, sqlx::Sqlite>,
) -> Result<Payment, PaymentFlowError> {
    let current = payments::fetch_payment_by_id(payment_id, &mut tx)
        .await
        .map_err(PaymentFlowError::from)?
        .ok_or_else(|| PaymentFlowError::DatabaseError(format!("payment {payment_id} disappeared mid-update")))?;
    tx.commit().await.map_err(PaymentFlowError::from)?;
    if current.status == requested {
        debug!("🗃️ Payment #{payment_id} was already {requested}. Treating as duplicate delivery");
        Ok(current)
    } else {
        Err(PaymentFlowError::StatusMismatch { stored: current.status, requested })
    }
}
