use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderItem, OrderStatus},
    foe_api::errors::OrderFlowError,
};

/// Inserts a new order and its items. This is not atomic by itself; callers wrap it in a
/// transaction and pass `&mut *tx`.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderFlowError> {
    let mut row: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (customer_id, total, status)
            VALUES ($1, $2, 'R')
            RETURNING *;
        "#,
    )
    .bind(order.customer_id)
    .bind(order.total)
    .fetch_one(&mut *conn)
    .await?;
    for item in order.items {
        let stored: OrderItem = sqlx::query_as(
            r#"
                INSERT INTO order_items (order_id, product_id, unit_price, quantity)
                VALUES ($1, $2, $3, $4)
                RETURNING *;
            "#,
        )
        .bind(row.id)
        .bind(item.product_id)
        .bind(item.unit_price)
        .bind(item.quantity)
        .fetch_one(&mut *conn)
        .await?;
        row.items.push(stored);
    }
    debug!("📝️ Order #{} inserted with {} items", row.id, row.items.len());
    Ok(row)
}

/// Returns an order with its items, or `None` if it does not exist.
pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(&mut *conn).await?;
    match order {
        Some(mut order) => {
            order.items = fetch_order_items(order.id, conn).await?;
            Ok(Some(order))
        },
        None => Ok(None),
    }
}

pub async fn fetch_order_items(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
        .bind(order_id)
        .fetch_all(conn)
        .await
}

/// Fetches a page of orders (items included), oldest first.
pub async fn fetch_orders(
    offset: i64,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let mut orders: Vec<Order> =
        sqlx::query_as("SELECT * FROM orders ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await?;
    for order in &mut orders {
        order.items = fetch_order_items(order.id, &mut *conn).await?;
    }
    trace!("📝️ Fetched {} orders (offset {offset}, limit {limit})", orders.len());
    Ok(orders)
}

pub async fn count_orders(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders").fetch_one(conn).await?;
    Ok(count)
}

/// Compare-and-swap on the order status. The update only applies while the status is still
/// `from`; `None` means the guard failed and the caller should re-read.
pub async fn update_order_status_cas(
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderFlowError> {
    let row: Option<Order> = sqlx::query_as(
        "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND status = $3 RETURNING *",
    )
    .bind(to)
    .bind(id)
    .bind(from)
    .fetch_optional(&mut *conn)
    .await?;
    match row {
        Some(mut order) => {
            order.items = fetch_order_items(order.id, conn).await?;
            trace!("📝️ Order #{id} status updated {from} → {to}");
            Ok(Some(order))
        },
        None => Ok(None),
    }
}
