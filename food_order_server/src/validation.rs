//! Shape-level validation of inbound bodies.
//!
//! Everything here answers one question: is the body well-formed enough to hand to the engine? It
//! checks presence and parseability only. Domain rules (totals matching, catalog membership,
//! lifecycle state) belong to the engine and are not duplicated here.
use fog_common::Money;
use food_order_engine::{
    db_types::{NewOrder, NewOrderItem},
    order_objects::DEFAULT_PAGE_SIZE,
    payment_objects::{PaymentOutcome, WebhookNotification},
};

use crate::{
    data_objects::{CreateOrderRequest, ListOrdersQuery, OrderItemRequest, PaymentRequestBody, WebhookRequestBody},
    errors::{FieldError, ServerError},
};

pub fn validate_create_order(body: CreateOrderRequest) -> Result<NewOrder, ServerError> {
    let mut fields = Vec::new();
    let customer_id = match body.customer_id {
        Some(id) => id,
        None => {
            fields.push(FieldError::new("customer_id", "customer_id is required"));
            0
        },
    };
    let total = parse_money("total", body.total.as_deref(), &mut fields);
    let items = match body.items {
        Some(items) => {
            items.into_iter().enumerate().map(|(i, item)| validate_item(i, item, &mut fields)).collect()
        },
        None => {
            fields.push(FieldError::new("items", "items is required"));
            Vec::new()
        },
    };
    if fields.is_empty() {
        Ok(NewOrder::new(customer_id, items, total))
    } else {
        Err(ServerError::FieldValidation(fields))
    }
}

fn validate_item(index: usize, item: OrderItemRequest, fields: &mut Vec<FieldError>) -> NewOrderItem {
    let product_id = match item.product_id {
        Some(id) => id,
        None => {
            fields.push(FieldError::new(format!("items[{index}].product_id"), "product_id is required"));
            0
        },
    };
    let unit_price = parse_money(&format!("items[{index}].unit_price"), item.unit_price.as_deref(), fields);
    let quantity = match item.quantity {
        Some(q) => q,
        None => {
            fields.push(FieldError::new(format!("items[{index}].quantity"), "quantity is required"));
            0
        },
    };
    NewOrderItem::new(product_id, unit_price, quantity)
}

fn parse_money(field: &str, value: Option<&str>, fields: &mut Vec<FieldError>) -> Money {
    match value {
        Some(v) => match v.parse::<Money>() {
            Ok(m) => m,
            Err(e) => {
                fields.push(FieldError::new(field, e.to_string()));
                Money::ZERO
            },
        },
        None => {
            fields.push(FieldError::new(field, format!("{field} is required")));
            Money::ZERO
        },
    }
}

pub fn validate_payment_request(body: PaymentRequestBody) -> Result<i64, ServerError> {
    body.method_id
        .ok_or_else(|| ServerError::FieldValidation(vec![FieldError::new("method_id", "method_id is required")]))
}

pub fn validate_webhook(body: WebhookRequestBody) -> Result<WebhookNotification, ServerError> {
    let mut fields = Vec::new();
    let provider_id = match body.id {
        Some(id) if !id.is_empty() => id,
        _ => {
            fields.push(FieldError::new("id", "id is required"));
            String::new()
        },
    };
    let outcome = match body.status.as_deref() {
        Some("CONFIRMED") => PaymentOutcome::Confirmed,
        Some("FAILED") => PaymentOutcome::Failed,
        Some(other) => {
            fields.push(FieldError::new("status", format!("'{other}' is not a recognized status")));
            PaymentOutcome::Failed
        },
        None => {
            fields.push(FieldError::new("status", "status is required"));
            PaymentOutcome::Failed
        },
    };
    let order_id = match body.reference {
        Some(id) => id,
        None => {
            fields.push(FieldError::new("reference", "reference is required"));
            0
        },
    };
    if fields.is_empty() {
        Ok(WebhookNotification { provider_id, outcome, order_id })
    } else {
        Err(ServerError::FieldValidation(fields))
    }
}

/// Applies the listing defaults: page 1, 25 per page. Range checks live in the engine.
pub fn pagination(query: ListOrdersQuery) -> (i64, i64) {
    (query.page.unwrap_or(1), query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
}
