//! Application state shared by the route handlers

use domain_products::MongoProductRepository;
use mongodb::{Client, Database};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    /// Database named by `MONGODB_DATABASE`
    pub db: Database,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config,
            mongo_client,
            db,
        }
    }

    /// Repository over the configured products collection (`PRODUCTS_COLLECTION`).
    pub fn products_repository(&self) -> MongoProductRepository {
        MongoProductRepository::with_collection(&self.db, &self.config.products_collection)
    }
}
