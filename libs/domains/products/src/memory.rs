//! In-memory ProductRepository for tests and local runs without MongoDB

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// Keeps products in insertion order; a save with a known id replaces in place.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        Ok(product)
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }
}
