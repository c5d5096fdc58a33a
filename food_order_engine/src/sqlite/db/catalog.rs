//! Reads against the collaborator tables (customers, products, payment methods). The order core
//! only checks existence and reads payment method availability; CRUD for these entities lives
//! outside this crate.
use fog_common::Money;
use sqlx::SqliteConnection;

use crate::db_types::PaymentMethod;

pub async fn customer_exists(customer_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM customers WHERE id = $1").bind(customer_id).fetch_optional(conn).await?;
    Ok(row.is_some())
}

pub async fn product_exists(product_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM products WHERE id = $1").bind(product_id).fetch_optional(conn).await?;
    Ok(row.is_some())
}

pub async fn fetch_payment_method(
    method_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentMethod>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payment_methods WHERE id = $1").bind(method_id).fetch_optional(conn).await
}

// Seed helpers, used to provision fixtures and demo data.

pub async fn insert_customer(name: &str, cpf: &str, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as("INSERT INTO customers (name, cpf) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(cpf)
        .fetch_one(conn)
        .await?;
    Ok(id)
}

pub async fn insert_product(
    name: &str,
    unit_price: Money,
    conn: &mut SqliteConnection,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO products (name, unit_price) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(unit_price)
            .fetch_one(conn)
            .await?;
    Ok(id)
}

pub async fn insert_payment_method(
    name: &str,
    enabled: bool,
    conn: &mut SqliteConnection,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO payment_methods (name, enabled) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(enabled)
            .fetch_one(conn)
            .await?;
    Ok(id)
}
