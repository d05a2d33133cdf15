use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ProductResult;
use crate::models::{PriceRange, Product};

/// Repository trait for Product persistence.
///
/// Multi-item queries return a stream that starts the query when first
/// polled. Single-item lookups resolve to `None` when nothing matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, in store iteration order
    fn find_all(&self) -> BoxStream<'static, ProductResult<Product>>;

    async fn find_by_id(&self, id: String) -> ProductResult<Option<Product>>;

    /// Products whose price lies in the closed range, in store order
    fn find_by_price_between(&self, range: PriceRange)
    -> BoxStream<'static, ProductResult<Product>>;

    /// Insert or replace by id; assigns an id when the product has none
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Delete by id. Deleting a missing id succeeds.
    async fn delete_by_id(&self, id: String) -> ProductResult<()>;
}
