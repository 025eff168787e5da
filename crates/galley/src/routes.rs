//! Route table.

use galley_config::ServerConfig;
use galley_server::Server;

use crate::state::AppState;
use crate::{dishes, orders};

/// Builds the server with every dish and order route bound to `state`.
#[must_use]
pub fn app(state: &AppState, config: ServerConfig) -> Server {
    let bound = dishes::routes(&state.dishes)
        .into_iter()
        .chain(orders::routes(&state.orders, state.persist_order_updates));

    bound
        .fold(
            Server::builder().config(config).version(crate::VERSION),
            |builder, (pattern, routes)| builder.route(pattern, routes),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_bound() {
        let server = app(&AppState::new(), ServerConfig::default());
        assert_eq!(server.route_count(), 4);
    }
}
