//! Dish records and request payloads.

use galley_core::{ApiError, ApiResult};
use galley_middleware::Payload;
use galley_store::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Assigned by the store on creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Menu description.
    pub description: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Picture of the dish.
    pub image_url: String,
}

impl Entity for Dish {
    const KIND: &'static str = "Dish";

    fn id(&self) -> &str {
        &self.id
    }
}

/// The `data` object of a dish request.
///
/// Fields stay as raw JSON until the chain has checked them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPayload {
    /// Optional body id, checked against the route.
    pub id: Option<Value>,
    /// Display name.
    pub name: Option<Value>,
    /// Menu description.
    pub description: Option<Value>,
    /// Price.
    pub price: Option<Value>,
    /// Picture of the dish.
    pub image_url: Option<Value>,
}

impl Payload for DishPayload {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "id" => self.id.as_ref(),
            "name" => self.name.as_ref(),
            "description" => self.description.as_ref(),
            "price" => self.price.as_ref(),
            "image_url" => self.image_url.as_ref(),
            _ => None,
        }
    }
}

impl DishPayload {
    /// Returns a text field as an owned string.
    ///
    /// A present value that is not a JSON string is rejected with the same
    /// message as a missing one.
    pub fn text(&self, field: &'static str) -> ApiResult<String> {
        match self.present(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(ApiError::validation(format!(
                "{} must include a {field}.",
                Dish::KIND
            ))),
        }
    }

    /// Returns the price once it has passed the price check.
    pub fn price(&self) -> ApiResult<u64> {
        self.price
            .as_ref()
            .and_then(valid_price)
            .ok_or_else(|| ApiError::validation(super::validators::PRICE_MESSAGE))
    }

    /// Builds the dish these fields describe under `id`.
    pub fn to_dish(&self, id: String) -> ApiResult<Dish> {
        Ok(Dish {
            id,
            name: self.text("name")?,
            description: self.text("description")?,
            price: self.price()?,
            image_url: self.text("image_url")?,
        })
    }
}

/// A price is a JSON integer greater than zero.
pub(crate) fn valid_price(value: &Value) -> Option<u64> {
    value.as_u64().filter(|price| *price > 0)
}
