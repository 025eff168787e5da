//! The `/dishes` resource.
//!
//! | Route | Chain |
//! |---|---|
//! | `GET /dishes` | list |
//! | `POST /dishes` | has(name), has(description), has(price), has(image_url), price, create |
//! | `GET /dishes/{dishId}` | exists, read |
//! | `PUT /dishes/{dishId}` | exists, has(name), has(description), has(price), has(image_url), price, id-match, update |

pub mod handlers;
pub mod model;
pub mod validators;

use std::sync::Arc;

use galley_middleware::validators::{entity_exists, require_field, route_id_matches};
use galley_middleware::{Chain, ChainBuilder};
use galley_router::MethodRouter;
use galley_server::{ChainEndpoint, Routes};
use galley_store::SharedStore;

pub use model::{Dish, DishPayload};

/// Route parameter naming a dish.
pub const DISH_ID: &str = "dishId";

/// Collection path.
pub const DISHES_PATH: &str = "/dishes";

/// Item path.
pub const DISH_PATH: &str = "/dishes/{dishId}";

fn with_required_fields(builder: ChainBuilder<Dish, DishPayload>) -> ChainBuilder<Dish, DishPayload> {
    builder
        .validate(require_field("name"))
        .validate(require_field("description"))
        .validate(require_field("price"))
        .validate(require_field("image_url"))
        .validate(validators::price_is_positive_integer())
}

/// Chain for `GET /dishes`.
pub fn list_chain() -> Chain<Dish, DishPayload> {
    Chain::builder().handle(handlers::list)
}

/// Chain for `POST /dishes`.
pub fn create_chain() -> Chain<Dish, DishPayload> {
    with_required_fields(Chain::builder()).handle(handlers::create)
}

/// Chain for `GET /dishes/{dishId}`.
pub fn read_chain() -> Chain<Dish, DishPayload> {
    Chain::builder()
        .validate(entity_exists(DISH_ID))
        .handle(handlers::read)
}

/// Chain for `PUT /dishes/{dishId}`.
pub fn update_chain() -> Chain<Dish, DishPayload> {
    with_required_fields(Chain::builder().validate(entity_exists(DISH_ID)))
        .validate(route_id_matches(DISH_ID, validators::id_mismatch))
        .handle(handlers::update)
}

/// Binds the dish chains to `store`.
pub fn routes(store: &SharedStore<Dish>) -> [(&'static str, Routes); 2] {
    let bind = |chain: Chain<Dish, DishPayload>| ChainEndpoint::boxed(chain, Arc::clone(store));
    [
        (
            DISHES_PATH,
            MethodRouter::new()
                .get(bind(list_chain()))
                .post(bind(create_chain())),
        ),
        (
            DISH_PATH,
            MethodRouter::new()
                .get(bind(read_chain()))
                .put(bind(update_chain())),
        ),
    ]
}
