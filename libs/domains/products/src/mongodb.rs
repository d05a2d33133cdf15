//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, Product};
use crate::repository::ProductRepository;

/// Default collection holding product documents
pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Creates the ascending price index backing range queries.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "price": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_price".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn price_filter(range: &PriceRange) -> Document {
        doc! { "price": { "$gte": range.min, "$lte": range.max } }
    }

    /// Lazily runs `find(filter)` and flattens the cursor into a stream.
    fn find_stream(&self, filter: Document) -> BoxStream<'static, ProductResult<Product>> {
        let collection = self.collection.clone();
        stream::once(async move { collection.find(filter).await })
            .try_flatten()
            .map_err(ProductError::from)
            .boxed()
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    fn find_all(&self) -> BoxStream<'static, ProductResult<Product>> {
        self.find_stream(doc! {})
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: String) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    fn find_by_price_between(
        &self,
        range: PriceRange,
    ) -> BoxStream<'static, ProductResult<Product>> {
        self.find_stream(Self::price_filter(&range))
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let id = match product.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => ObjectId::new().to_hex(),
        };
        product.id = Some(id.clone());

        self.collection
            .replace_one(doc! { "_id": id.as_str() }, &product)
            .upsert(true)
            .await?;

        tracing::info!(product_id = %id, "Product saved");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: String) -> ProductResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        tracing::debug!(deleted = result.deleted_count, "Delete completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_filter_is_inclusive() {
        let filter = MongoProductRepository::price_filter(&PriceRange::new(20.0, 26.0));
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 20.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 26.0);
        assert!(!price.contains_key("$gt"));
        assert!(!price.contains_key("$lt"));
    }
}
