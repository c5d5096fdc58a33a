use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, Payment, PaymentStatus},
    foe_api::errors::PaymentFlowError,
};

/// Inserts a `Pending` payment. The partial unique index on `payments (order_id) WHERE
/// status = 'Pending'` rejects a second active payment for the same order; that violation is
/// surfaced as [`PaymentFlowError::DuplicatePaymentRequest`].
pub async fn insert_payment(
    payment: NewPayment,
    conn: &mut SqliteConnection,
) -> Result<Payment, PaymentFlowError> {
    let result: Result<Payment, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO payments (order_id, method_id, amount, provider_id, status)
            VALUES ($1, $2, $3, $4, 'Pending')
            RETURNING *;
        "#,
    )
    .bind(payment.order_id)
    .bind(payment.method_id)
    .bind(payment.amount)
    .bind(&payment.provider_id)
    .fetch_one(conn)
    .await;
    match result {
        Ok(row) => {
            debug!("📝️ Payment #{} ({}) inserted for order #{}", row.id, row.provider_id, row.order_id);
            Ok(row)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(PaymentFlowError::DuplicatePaymentRequest(payment.order_id))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_payment_by_provider_id(
    provider_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE provider_id = $1").bind(provider_id).fetch_optional(conn).await
}

pub async fn fetch_payment_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE id = $1").bind(id).fetch_optional(conn).await
}

/// Returns the order's non-terminal payment, if any. The partial unique index guarantees there is
/// at most one.
pub async fn fetch_pending_payment(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE order_id = $1 AND status = 'Pending'")
        .bind(order_id)
        .fetch_optional(conn)
        .await
}

/// Compare-and-swap on the payment status. Only applies while the status is still `from`;
/// `None` means another writer got there first.
pub async fn update_payment_status_cas(
    id: i64,
    from: PaymentStatus,
    to: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, PaymentFlowError> {
    let row: Option<Payment> = sqlx::query_as(
        "UPDATE payments SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND status = $3 \
         RETURNING *",
    )
    .bind(to)
    .bind(id)
    .bind(from)
    .fetch_optional(conn)
    .await?;
    if row.is_some() {
        trace!("📝️ Payment #{id} status updated {from} → {to}");
    }
    Ok(row)
}
