use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use fog_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   OrderStatus   -------------------------------------------------------------
/// The lifecycle status of an order.
///
/// The wire and database encoding is the single-letter code (`R`/`E`/`P`/`F`). External consumers
/// depend on these codes, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been placed and no payment has been confirmed yet.
    #[sqlx(rename = "R")]
    #[serde(rename = "R")]
    Received,
    /// Payment is confirmed and the kitchen is working on the order.
    #[sqlx(rename = "E")]
    #[serde(rename = "E")]
    InPreparation,
    /// The order is ready for pickup.
    #[sqlx(rename = "P")]
    #[serde(rename = "P")]
    Ready,
    /// The order has been handed over. Terminal.
    #[sqlx(rename = "F")]
    #[serde(rename = "F")]
    Completed,
}

impl OrderStatus {
    pub fn letter_code(&self) -> &'static str {
        match self {
            OrderStatus::Received => "R",
            OrderStatus::InPreparation => "E",
            OrderStatus::Ready => "P",
            OrderStatus::Completed => "F",
        }
    }

    /// The status that follows this one in the lifecycle, or `None` for the terminal status.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Received => Some(OrderStatus::InPreparation),
            OrderStatus::InPreparation => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter_code())
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid status code: {0}")]
pub struct StatusConversionError(pub String);

impl FromStr for OrderStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(OrderStatus::Received),
            "E" => Ok(OrderStatus::InPreparation),
            "P" => Ok(OrderStatus::Ready),
            "F" => Ok(OrderStatus::Completed),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------  PaymentStatus  -------------------------------------------------------------
/// The status of a payment request. `Confirmed` and `Failed` are terminal; a terminal payment is
/// never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Confirmed | PaymentStatus::Failed)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Confirmed => write!(f, "Confirmed"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "PENDING" => Ok(PaymentStatus::Pending),
            "Confirmed" | "CONFIRMED" => Ok(PaymentStatus::Confirmed),
            "Failed" | "FAILED" => Ok(PaymentStatus::Failed),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------      Order      -------------------------------------------------------------
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Must always equal the sum of `unit_price * quantity` over the items.
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Loaded separately from the `order_items` table.
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub unit_price: Money,
    pub quantity: i64,
}

//--------------------------------------     NewOrder    -------------------------------------------------------------
/// An order as submitted by a customer, before it has been persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub items: Vec<NewOrderItem>,
    /// The total declared by the caller. Must equal the computed sum of the items.
    pub total: Money,
}

impl NewOrder {
    pub fn new(customer_id: i64, items: Vec<NewOrderItem>, total: Money) -> Self {
        Self { customer_id, items, total }
    }
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub unit_price: Money,
    pub quantity: i64,
}

impl NewOrderItem {
    pub fn new(product_id: i64, unit_price: Money, quantity: i64) -> Self {
        Self { product_id, unit_price, quantity }
    }
}

//--------------------------------------     Payment     -------------------------------------------------------------
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub method_id: i64,
    /// Always equals the total of the owning order at solicitation time.
    pub amount: Money,
    /// Opaque identifier issued by the external payment provider.
    pub provider_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A payment request that has been accepted by the provider but not yet persisted.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: i64,
    pub method_id: i64,
    pub amount: Money,
    pub provider_id: String,
}

//--------------------------------------  PaymentMethod  -------------------------------------------------------------
#[derive(Debug, Clone, FromRow)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
}
