use fog_common::Money;

use crate::{
    db_types::{NewOrder, NewOrderItem},
    foe_api::errors::OrderFlowError,
};

/// Computes the exact total of an item list as Σ `unit_price × quantity`, in cents.
pub fn order_total(items: &[NewOrderItem]) -> Result<Money, OrderFlowError> {
    items.iter().try_fold(Money::ZERO, |acc, item| {
        item.unit_price
            .checked_mul(item.quantity)
            .and_then(|line| acc.checked_add(line))
            .ok_or_else(|| OrderFlowError::InvalidUnitPrice(format!(
                "item total for product {} overflows the supported range",
                item.product_id
            )))
    })
}

/// Validates the business invariants of a new order: a non-empty item list, positive quantities
/// and prices, and a declared total that matches the computed sum exactly.
pub fn validate_new_order(order: &NewOrder) -> Result<(), OrderFlowError> {
    if order.items.is_empty() {
        return Err(OrderFlowError::EmptyItemList);
    }
    for item in &order.items {
        if item.quantity <= 0 {
            return Err(OrderFlowError::InvalidQuantity(item.product_id));
        }
        if !item.unit_price.is_positive() {
            return Err(OrderFlowError::InvalidUnitPrice(format!(
                "unit price for product {} must be greater than zero",
                item.product_id
            )));
        }
    }
    let computed = order_total(&order.items)?;
    if computed != order.total {
        return Err(OrderFlowError::TotalMismatch { declared: order.total, computed });
    }
    if !order.total.is_positive() {
        return Err(OrderFlowError::ZeroTotal);
    }
    Ok(())
}
