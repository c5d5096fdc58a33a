use chrono::{DateTime, Utc};
use fog_common::Money;
use food_order_engine::db_types::{Order, OrderItem, OrderStatus, Payment, PaymentStatus};
use serde::{Deserialize, Serialize};

//--------------------------------------  Inbound bodies  ------------------------------------------------------------

/// The create-order request body. Every field is optional at the serde level so that missing
/// fields surface as a structured validation response instead of a bare deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Option<i64>,
    pub items: Option<Vec<OrderItemRequest>>,
    /// Decimal string, e.g. "25.50". Must equal the computed item sum.
    pub total: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Option<i64>,
    pub unit_price: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequestBody {
    pub method_id: Option<i64>,
}

/// The raw webhook body as the gateway sends it. `id` is the gateway's payment identifier,
/// `reference` echoes our order id, and `status` is the gateway's outcome vocabulary
/// (`CONFIRMED` or `FAILED`).
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequestBody {
    pub id: Option<String>,
    pub status: Option<String>,
    pub reference: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

//--------------------------------------  Outbound bodies  -----------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: i64,
    pub unit_price: Money,
    pub quantity: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self { product_id: item.product_id, unit_price: item.unit_price, quantity: item.quantity }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: i64,
    pub order_id: i64,
    pub provider_id: String,
    pub amount: Money,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            provider_id: payment.provider_id,
            amount: payment.amount,
            status: payment.status,
            created_at: payment.created_at,
        }
    }
}

/// Minimal acknowledgement body, used where there is nothing else to say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self { success: true, message: message.into() }
    }
}
