//! Product Service - orchestration over the repository

use futures::stream::BoxStream;
use std::future::IntoFuture;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::ProductResult;
use crate::models::{PriceRange, Product};
use crate::repository::ProductRepository;

/// Product service.
///
/// Create and update take the product as a deferred value (anything that
/// resolves to `ProductResult<Product>`), so decoding the request body is part
/// of the operation. Update only resolves it once the target record is known
/// to exist.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every stored product, in store iteration order.
    pub fn get_products(&self) -> BoxStream<'static, ProductResult<Product>> {
        info!("Fetching products in database");
        self.repository.find_all()
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        info!("Fetching product in database with id {}", id);
        self.repository.find_by_id(id.to_string()).await
    }

    /// Products with `min <= price <= max`, in store order.
    pub fn get_product_by_price_range(
        &self,
        min: f64,
        max: f64,
    ) -> BoxStream<'static, ProductResult<Product>> {
        info!(
            "Fetching all products with price between {} and {} in database",
            min, max
        );
        self.repository
            .find_by_price_between(PriceRange::new(min, max))
    }

    #[instrument(skip(self, payload))]
    pub async fn save_product<P>(&self, payload: P) -> ProductResult<Product>
    where
        P: IntoFuture<Output = ProductResult<Product>>,
    {
        let product = payload.await?;
        info!("Saving product {:?}", product);
        self.repository.save(product).await
    }

    /// Replaces the product stored at `id`, keeping `id` whatever the payload
    /// says. Returns `None` without touching the payload when `id` is unknown.
    #[instrument(skip(self, payload))]
    pub async fn update_product<P>(&self, payload: P, id: &str) -> ProductResult<Option<Product>>
    where
        P: IntoFuture<Output = ProductResult<Product>>,
    {
        info!("Updating product with id {}", id);

        if self.repository.find_by_id(id.to_string()).await?.is_none() {
            debug!("No product with id {}, nothing to update", id);
            return Ok(None);
        }

        let mut product = payload.await?;
        debug!("Using data {:?}", product);
        product.id = Some(id.to_string());

        let saved = self.repository.save(product).await?;
        Ok(Some(saved))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        info!("Deleting product with id {}", id);
        self.repository.delete_by_id(id.to_string()).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
