//! HTTP surface of the service

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Mount point of the product resource
pub const PRODUCTS_PATH: &str = "/products";

/// Product routes under [`PRODUCTS_PATH`] plus `/ready`.
///
/// `/health` and the documentation UIs are added by `axum_helpers`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest(PRODUCTS_PATH, products::router(state))
        .merge(health::router(state.clone()))
}

/// Creates the indexes product queries rely on.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
