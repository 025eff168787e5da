//! Terminal handlers for the order routes.

use galley_core::ApiResult;
use galley_middleware::{Exchange, Reply};

use super::model::{Order, OrderPayload};

type OrderExchange<'a> = Exchange<'a, Order, OrderPayload>;

/// `GET /orders`
pub fn list(ex: &mut OrderExchange<'_>) -> ApiResult<Reply> {
    Reply::ok(&ex.store.list())
}

/// `POST /orders`
pub fn create(ex: &mut OrderExchange<'_>) -> ApiResult<Reply> {
    let id = ex.store.next_id();
    let order = ex.store.create(ex.payload.to_order(id)?)?;
    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        lines = order.dishes.len(),
        "order created"
    );
    Reply::created(&order)
}

/// `GET /orders/{orderId}`
pub fn read(ex: &mut OrderExchange<'_>) -> ApiResult<Reply> {
    Reply::ok(ex.found()?)
}

/// `PUT /orders/{orderId}`
///
/// Replaces the order under the route id. With `persist` off the replacement
/// is only echoed back.
pub fn update(ex: &mut OrderExchange<'_>, persist: bool) -> ApiResult<Reply> {
    let id = ex.param(super::ORDER_ID)?.to_string();
    let order = ex.payload.to_order(id)?;
    if !persist {
        tracing::debug!(order_id = %order.id, "order update not persisted");
        return Reply::ok(&order);
    }
    let order = ex.store.update(order)?;
    tracing::info!(order_id = %order.id, status = %order.status, "order updated");
    Reply::ok(&order)
}

/// `DELETE /orders/{orderId}`
pub fn delete(ex: &mut OrderExchange<'_>) -> ApiResult<Reply> {
    let id = ex.found()?.id.clone();
    ex.store.remove(&id)?;
    tracing::info!(order_id = %id, "order deleted");
    Ok(Reply::no_content())
}
