//! The `/orders` resource.
//!
//! | Route | Chain |
//! |---|---|
//! | `GET /orders` | list |
//! | `POST /orders` | has(deliverTo), has(mobileNumber), has(dishes), dishes-shape, quantities, status-if-present, create |
//! | `GET /orders/{orderId}` | exists, read |
//! | `PUT /orders/{orderId}` | exists, has(deliverTo), has(mobileNumber), has(dishes), id-match, status, dishes-shape, quantities, update |
//! | `DELETE /orders/{orderId}` | exists, pending-only, delete |

pub mod handlers;
pub mod model;
pub mod validators;

use std::sync::Arc;

use galley_middleware::validators::{
    entity_exists, require_field, require_field_as, route_id_matches,
};
use galley_middleware::{Chain, ChainBuilder, Exchange};
use galley_router::MethodRouter;
use galley_server::{ChainEndpoint, Routes};
use galley_store::SharedStore;

pub use model::{Order, OrderLine, OrderPayload, OrderStatus};

/// Route parameter naming an order.
pub const ORDER_ID: &str = "orderId";

/// Collection path.
pub const ORDERS_PATH: &str = "/orders";

/// Item path.
pub const ORDER_PATH: &str = "/orders/{orderId}";

fn with_required_fields(
    builder: ChainBuilder<Order, OrderPayload>,
) -> ChainBuilder<Order, OrderPayload> {
    builder
        .validate(require_field("deliverTo"))
        .validate(require_field("mobileNumber"))
        .validate(require_field_as("dishes", "dish"))
}

/// Chain for `GET /orders`.
pub fn list_chain() -> Chain<Order, OrderPayload> {
    Chain::builder().handle(handlers::list)
}

/// Chain for `POST /orders`.
pub fn create_chain() -> Chain<Order, OrderPayload> {
    with_required_fields(Chain::builder())
        .validate(validators::dishes_shape())
        .validate(validators::quantities())
        .validate(validators::status_if_present())
        .handle(handlers::create)
}

/// Chain for `GET /orders/{orderId}`.
pub fn read_chain() -> Chain<Order, OrderPayload> {
    Chain::builder()
        .validate(entity_exists(ORDER_ID))
        .handle(handlers::read)
}

/// Chain for `PUT /orders/{orderId}`.
pub fn update_chain(persist: bool) -> Chain<Order, OrderPayload> {
    with_required_fields(Chain::builder().validate(entity_exists(ORDER_ID)))
        .validate(route_id_matches(ORDER_ID, validators::id_mismatch))
        .validate(validators::status())
        .validate(validators::dishes_shape())
        .validate(validators::quantities())
        .handle(move |ex: &mut Exchange<'_, Order, OrderPayload>| handlers::update(ex, persist))
}

/// Chain for `DELETE /orders/{orderId}`.
pub fn delete_chain() -> Chain<Order, OrderPayload> {
    Chain::builder()
        .validate(entity_exists(ORDER_ID))
        .validate(validators::pending_only())
        .handle(handlers::delete)
}

/// Binds the order chains to `store`.
///
/// `persist_updates` decides whether `PUT` writes the replacement back.
pub fn routes(store: &SharedStore<Order>, persist_updates: bool) -> [(&'static str, Routes); 2] {
    let bind = |chain: Chain<Order, OrderPayload>| ChainEndpoint::boxed(chain, Arc::clone(store));
    [
        (
            ORDERS_PATH,
            MethodRouter::new()
                .get(bind(list_chain()))
                .post(bind(create_chain())),
        ),
        (
            ORDER_PATH,
            MethodRouter::new()
                .get(bind(read_chain()))
                .put(bind(update_chain(persist_updates)))
                .delete(bind(delete_chain())),
        ),
    ]
}
