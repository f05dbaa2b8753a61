use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Storage of Product documents keyed by `id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product, or replace the stored one with the same id.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Every stored product in the store's natural order.
    async fn find_all(&self) -> ProductResult<Vec<Product>>;
}
