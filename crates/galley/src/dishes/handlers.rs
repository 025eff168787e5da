//! Terminal handlers for the dish routes.

use galley_core::ApiResult;
use galley_middleware::{Exchange, Reply};

use super::model::{Dish, DishPayload};

type DishExchange<'a> = Exchange<'a, Dish, DishPayload>;

/// `GET /dishes`
pub fn list(ex: &mut DishExchange<'_>) -> ApiResult<Reply> {
    Reply::ok(&ex.store.list())
}

/// `POST /dishes`
pub fn create(ex: &mut DishExchange<'_>) -> ApiResult<Reply> {
    let id = ex.store.next_id();
    let dish = ex.store.create(ex.payload.to_dish(id)?)?;
    tracing::info!(dish_id = %dish.id, name = %dish.name, "dish created");
    Reply::created(&dish)
}

/// `GET /dishes/{dishId}`
pub fn read(ex: &mut DishExchange<'_>) -> ApiResult<Reply> {
    Reply::ok(ex.found()?)
}

/// `PUT /dishes/{dishId}`
///
/// Overwrites every mutable field; the id never changes.
pub fn update(ex: &mut DishExchange<'_>) -> ApiResult<Reply> {
    let id = ex.found()?.id.clone();
    let dish = ex.store.update(ex.payload.to_dish(id)?)?;
    tracing::info!(dish_id = %dish.id, "dish updated");
    Reply::ok(&dish)
}
