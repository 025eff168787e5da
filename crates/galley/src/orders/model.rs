//! Order records and request payloads.

use std::fmt;

use galley_core::{ApiError, ApiResult};
use galley_middleware::Payload;
use galley_store::Entity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Placed, not yet started. The only deletable state.
    #[default]
    Pending,
    /// In the kitchen.
    Preparing,
    /// On its way.
    OutForDelivery,
    /// Handed over.
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an order's `dishes`.
///
/// Everything besides `quantity` (usually a copy of the dish) is kept as the
/// client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// How many of this dish.
    pub quantity: u64,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the store on creation.
    pub id: String,
    /// Delivery address.
    #[serde(rename = "deliverTo")]
    pub deliver_to: String,
    /// Contact number.
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Ordered dishes, never empty.
    pub dishes: Vec<OrderLine>,
}

impl Entity for Order {
    const KIND: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }
}

/// The `data` object of an order request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPayload {
    /// Optional body id, checked against the route.
    pub id: Option<Value>,
    /// Delivery address.
    #[serde(rename = "deliverTo")]
    pub deliver_to: Option<Value>,
    /// Contact number.
    #[serde(rename = "mobileNumber")]
    pub mobile_number: Option<Value>,
    /// Lifecycle state.
    pub status: Option<Value>,
    /// Ordered dishes.
    pub dishes: Option<Value>,
}

impl Payload for OrderPayload {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "id" => self.id.as_ref(),
            "deliverTo" => self.deliver_to.as_ref(),
            "mobileNumber" => self.mobile_number.as_ref(),
            "status" => self.status.as_ref(),
            "dishes" => self.dishes.as_ref(),
            _ => None,
        }
    }
}

impl OrderPayload {
    /// Returns a text field, rejecting non-strings like missing values.
    pub fn text(&self, field: &'static str) -> ApiResult<String> {
        match self.present(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(ApiError::validation(format!(
                "{} must include a {field}.",
                Order::KIND
            ))),
        }
    }

    /// Returns the status, or `None` when the client sent none.
    ///
    /// An unknown value is rejected.
    pub fn status(&self) -> ApiResult<Option<OrderStatus>> {
        match &self.status {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_str()
                .and_then(OrderStatus::parse)
                .map(Some)
                .ok_or_else(|| ApiError::validation(super::validators::STATUS_MESSAGE)),
        }
    }

    /// Returns the order lines once the shape and quantity checks passed.
    pub fn lines(&self) -> ApiResult<Vec<OrderLine>> {
        let dishes = self
            .dishes
            .as_ref()
            .and_then(Value::as_array)
            .filter(|dishes| !dishes.is_empty())
            .ok_or_else(|| ApiError::validation(super::validators::DISHES_MESSAGE))?;

        dishes
            .iter()
            .enumerate()
            .map(|(index, line)| {
                serde_json::from_value(line.clone())
                    .map_err(|_| ApiError::validation(super::validators::quantity_message(index)))
            })
            .collect()
    }

    /// Builds the order these fields describe under `id`.
    ///
    /// A missing status means [`OrderStatus::Pending`].
    pub fn to_order(&self, id: String) -> ApiResult<Order> {
        Ok(Order {
            id,
            deliver_to: self.text("deliverTo")?,
            mobile_number: self.text("mobileNumber")?,
            status: self.status()?.unwrap_or_default(),
            dishes: self.lines()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(data: Value) -> OrderPayload {
        serde_json::from_value(data).unwrap()
    }

    #[test]
    fn test_status_wire_names() {
        for status in OrderStatus::ALL {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, json!(status.as_str()));
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("cancelled"), None);
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "out-for-delivery");
    }

    #[test]
    fn test_line_keeps_extra_fields() {
        let line: OrderLine =
            serde_json::from_value(json!({ "id": "3", "name": "Soup", "quantity": 2 })).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.extra.get("name"), Some(&json!("Soup")));
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({ "id": "3", "name": "Soup", "quantity": 2 })
        );
    }

    #[test]
    fn test_order_wire_format() {
        let order = payload(json!({
            "deliverTo": "1 Main St",
            "mobileNumber": "555",
            "dishes": [{ "id": "1", "quantity": 1 }]
        }))
        .to_order("9".into())
        .unwrap();

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "id": "9",
                "deliverTo": "1 Main St",
                "mobileNumber": "555",
                "status": "pending",
                "dishes": [{ "id": "1", "quantity": 1 }]
            })
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = payload(json!({ "status": "lost" })).status().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Order must have a status of pending, preparing, out-for-delivery, delivered"
        );
        assert_eq!(payload(json!({})).status().unwrap(), None);
    }
}
