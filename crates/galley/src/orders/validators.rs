//! Order-specific validators.

use galley_core::ApiError;
use galley_middleware::FnValidator;
use serde_json::Value;

use super::model::{Order, OrderPayload, OrderStatus};

/// Sent when `status` is missing or not one of [`OrderStatus::ALL`].
pub const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

/// Sent when `dishes` is not a non-empty array.
pub const DISHES_MESSAGE: &str = "Order must include at least one dish";

/// Sent when the order is past `pending` and cannot be deleted.
pub const NOT_PENDING_MESSAGE: &str = "An order cannot be deleted unless it is pending.";

/// Message for the first line whose quantity is invalid.
pub fn quantity_message(index: usize) -> String {
    format!("Dish {index} must have a quantity that is an integer greater than 0")
}

/// Message for a body id that disagrees with `/orders/{orderId}`.
pub fn id_mismatch(body_id: &str, route_id: &str) -> String {
    format!("Order id does not match route id. Order: {body_id}, Route: {route_id}.")
}

/// Requires `dishes` to be a non-empty array.
pub fn dishes_shape() -> FnValidator<Order, OrderPayload> {
    FnValidator::<Order, OrderPayload>::new("dishes-shape", |ex| {
        match ex.payload.dishes.as_ref().and_then(Value::as_array) {
            Some(dishes) if !dishes.is_empty() => Ok(()),
            _ => Err(ApiError::validation(DISHES_MESSAGE)),
        }
    })
}

/// Requires every line's `quantity` to be a JSON integer of at least one.
///
/// Reports the first offending index.
pub fn quantities() -> FnValidator<Order, OrderPayload> {
    FnValidator::<Order, OrderPayload>::new("quantities", |ex| {
        let Some(dishes) = ex.payload.dishes.as_ref().and_then(Value::as_array) else {
            return Err(ApiError::validation(DISHES_MESSAGE));
        };
        let bad = dishes.iter().position(|line| {
            line.get("quantity")
                .and_then(Value::as_u64)
                .map_or(true, |quantity| quantity == 0)
        });
        match bad {
            Some(index) => Err(ApiError::validation(quantity_message(index))),
            None => Ok(()),
        }
    })
}

/// Requires `status` to be one of the known values.
pub fn status() -> FnValidator<Order, OrderPayload> {
    FnValidator::<Order, OrderPayload>::new("status", |ex| match ex.payload.status()? {
        Some(_) => Ok(()),
        None => Err(ApiError::validation(STATUS_MESSAGE)),
    })
}

/// Like [`status`], but a missing or null `status` passes.
pub fn status_if_present() -> FnValidator<Order, OrderPayload> {
    FnValidator::<Order, OrderPayload>::new("status-if-present", |ex| {
        ex.payload.status().map(drop)
    })
}

/// Requires the order found by the existence check to still be pending.
pub fn pending_only() -> FnValidator<Order, OrderPayload> {
    FnValidator::<Order, OrderPayload>::new("pending-only", |ex| {
        if ex.found()?.status == OrderStatus::Pending {
            Ok(())
        } else {
            Err(ApiError::validation(NOT_PENDING_MESSAGE))
        }
    })
}
