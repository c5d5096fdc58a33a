use fog_common::Money;
use thiserror::Error;

use crate::db_types::{OrderStatus, PaymentStatus};

/// Classification of engine errors, consulted exactly once at the transport boundary to pick an
/// HTTP status. The engine itself never references transport codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent input.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// A state-machine or idempotence violation.
    Conflict,
    /// A domain-rule violation on otherwise well-formed input.
    Business,
    /// Anything that should never happen in normal operation.
    Internal,
}

//--------------------------------------  OrderFlowError  ------------------------------------------------------------
#[derive(Debug, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Customer {0} not found")]
    CustomerNotFound(i64),
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Order {0} not found")]
    OrderNotFound(i64),
    #[error("The item list must contain at least one element")]
    EmptyItemList,
    #[error("Quantity for product {0} must be greater than zero")]
    InvalidQuantity(i64),
    #[error("Invalid unit price: {0}")]
    InvalidUnitPrice(String),
    #[error("The order total {declared} differs from the sum of its items {computed}")]
    TotalMismatch { declared: Money, computed: Money },
    #[error("The order must have a total greater than zero")]
    ZeroTotal,
    #[error(
        "The order must be in preparation to become ready, or ready to be completed. Current status: {0}"
    )]
    InvalidStatusTransition(OrderStatus),
    #[error("The order was modified concurrently. Try again")]
    ConcurrentModification,
    #[error("The minimum page is 1")]
    InvalidPage,
}

impl OrderFlowError {
    pub fn kind(&self) -> ErrorKind {
        use OrderFlowError::*;
        match self {
            DatabaseError(_) => ErrorKind::Internal,
            CustomerNotFound(_) | ProductNotFound(_) | OrderNotFound(_) => ErrorKind::NotFound,
            EmptyItemList | InvalidQuantity(_) | InvalidUnitPrice(_) | InvalidPage => ErrorKind::Validation,
            TotalMismatch { .. } | ZeroTotal | InvalidStatusTransition(_) => ErrorKind::Business,
            ConcurrentModification => ErrorKind::Conflict,
        }
    }
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}

//-------------------------------------- PaymentFlowError ------------------------------------------------------------
#[derive(Debug, Error)]
pub enum PaymentFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} not found")]
    OrderNotFound(i64),
    #[error("Payment method {0} not found")]
    MethodNotFound(i64),
    #[error("Payment method '{0}' is not available")]
    MethodDisabled(String),
    #[error("The order must be in Received status to request payment. Current status: {0}")]
    OrderNotReceived(OrderStatus),
    #[error("The order has a zero amount to pay")]
    NothingToPay,
    #[error("Order {0} already has a pending payment request")]
    DuplicatePaymentRequest(i64),
    #[error("Payment not found for provider identifier '{0}'")]
    PaymentNotFound(String),
    #[error("Payment status mismatch: stored {stored}, requested {requested}")]
    StatusMismatch { stored: PaymentStatus, requested: PaymentStatus },
    #[error("Payment '{0}' does not belong to order {1}")]
    OrderMismatch(String, i64),
    #[error("Payment provider error: {0}")]
    ProviderError(String),
}

impl PaymentFlowError {
    pub fn kind(&self) -> ErrorKind {
        use PaymentFlowError::*;
        match self {
            DatabaseError(_) | ProviderError(_) => ErrorKind::Internal,
            OrderNotFound(_) | MethodNotFound(_) | PaymentNotFound(_) => ErrorKind::NotFound,
            MethodDisabled(_) | OrderNotReceived(_) => ErrorKind::Business,
            NothingToPay => ErrorKind::Validation,
            DuplicatePaymentRequest(_) | StatusMismatch { .. } | OrderMismatch(_, _) => ErrorKind::Conflict,
        }
    }
}

impl From<sqlx::Error> for PaymentFlowError {
    fn from(e: sqlx::Error) -> Self {
        PaymentFlowError::DatabaseError(e.to_string())
    }
}
