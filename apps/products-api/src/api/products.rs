//! Product routes backed by the configured MongoDB collection

use axum::Router;
use domain_products::{ProductService, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(ProductService::new(state.products_repository()))
}

/// Creates the `price` index used by range queries
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    state.products_repository().init_indexes().await?;
    info!(
        collection = %state.config.products_collection,
        "Product indexes ready"
    );
    Ok(())
}
