//! Dish-specific validators.

use galley_core::ApiError;
use galley_middleware::FnValidator;

use super::model::{valid_price, Dish, DishPayload};

/// Sent when `price` is not a positive integer.
pub const PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0.";

/// Requires `price` to be a JSON integer greater than zero.
pub fn price_is_positive_integer() -> FnValidator<Dish, DishPayload> {
    FnValidator::<Dish, DishPayload>::new("price", |ex| {
        match ex.payload.price.as_ref().and_then(valid_price) {
            Some(_) => Ok(()),
            None => Err(ApiError::validation(PRICE_MESSAGE)),
        }
    })
}

/// Message for a body id that disagrees with `/dishes/{dishId}`.
pub fn id_mismatch(body_id: &str, route_id: &str) -> String {
    format!("Dish id does not match route id. Dish: {body_id}, Route: {route_id}")
}
