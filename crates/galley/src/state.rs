//! Shared application state.

use galley_config::GalleyConfig;
use galley_store::{shared, MemoryRepository, SharedStore};

use crate::dishes::Dish;
use crate::orders::Order;
use crate::seed::{self, SeedError};

/// The stores behind every route, plus the settings handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Dish store.
    pub dishes: SharedStore<Dish>,
    /// Order store.
    pub orders: SharedStore<Order>,
    /// Whether `PUT /orders/{orderId}` writes back.
    pub persist_order_updates: bool,
}

impl AppState {
    /// Creates state with empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dishes: shared(MemoryRepository::new()),
            orders: shared(MemoryRepository::new()),
            persist_order_updates: true,
        }
    }

    /// Creates state holding `dishes` and `orders`.
    ///
    /// Fails if either list repeats an id.
    pub fn with_records(dishes: Vec<Dish>, orders: Vec<Order>) -> Result<Self, SeedError> {
        Ok(Self {
            dishes: shared(MemoryRepository::with_records(dishes)?),
            orders: shared(MemoryRepository::with_records(orders)?),
            persist_order_updates: true,
        })
    }

    /// Builds state from configuration, loading any seed files it names.
    pub fn from_config(config: &GalleyConfig) -> Result<Self, SeedError> {
        let dishes = seed::load_optional(config.seed.dishes_path.as_deref())?;
        let orders = seed::load_optional(config.seed.orders_path.as_deref())?;

        let mut state = Self::with_records(dishes, orders)?;
        state.persist_order_updates = config.orders.persist_updates;

        tracing::info!(
            dishes = state.dishes.lock().len(),
            orders = state.orders.lock().len(),
            persist_order_updates = state.persist_order_updates,
            "stores ready"
        );
        Ok(state)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("dishes", &self.dishes.lock().len())
            .field("orders", &self.orders.lock().len())
            .field("persist_order_updates", &self.persist_order_updates)
            .finish()
    }
}
